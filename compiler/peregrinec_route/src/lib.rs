//! Validates route handler declarations and extracts route records from them.
//!
//! The syntax facility hands every candidate method over as a
//! [`declaration::MethodDeclaration`]. A [`validator::Validator`] checks it
//! against the calling convention described by a [`contract::RouteContract`],
//! reports [`diagnostic::Violation`]s, and produces a [`record::RouteRecord`]
//! for every declaration that passes all hard checks.

pub mod contract;
pub mod declaration;
pub mod diagnostic;
pub mod record;
pub mod validator;
pub mod visitor;
