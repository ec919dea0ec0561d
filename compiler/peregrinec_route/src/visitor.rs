//! Contains the [`Visitor`] interface driven by the syntax facility and the
//! per-run [`Accumulator`] of route records.

use peregrinec_handler::Handler;

use crate::{
    declaration::MethodDeclaration,
    diagnostic::Violation,
    record::RouteRecord,
    validator::{ValidationOutcome, Validator},
};

/// Receives the candidate declarations one by one. The caller owns the
/// iteration order and the declarations.
pub trait Visitor {
    /// Visits a single declaration.
    fn visit(&mut self, declaration: &MethodDeclaration) -> ValidationOutcome;
}

/// Collects the route records found during one compilation run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Accumulator {
    records: Vec<RouteRecord>,
}

impl Accumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new() -> Self { Self { records: Vec::new() } }

    /// Adds a record.
    pub fn push(&mut self, record: RouteRecord) { self.records.push(record); }

    /// Gets the records in the order they were found.
    #[must_use]
    pub fn records(&self) -> &[RouteRecord] { &self.records }

    /// Gets the number of records found so far.
    #[must_use]
    pub fn len(&self) -> usize { self.records.len() }

    /// Checks whether no record has been found.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Consumes the accumulator, returning the records.
    #[must_use]
    pub fn into_records(self) -> Vec<RouteRecord> { self.records }
}

/// A [`Visitor`] validating every declaration and accumulating the valid
/// ones.
#[derive(derive_new::new)]
pub struct RouteVisitor<'a> {
    validator: &'a Validator,
    accumulator: &'a mut Accumulator,
    handler: &'a dyn Handler<Violation>,
}

impl std::fmt::Debug for RouteVisitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteVisitor")
            .field("validator", &self.validator)
            .field("accumulator", &self.accumulator)
            .finish_non_exhaustive()
    }
}

impl Visitor for RouteVisitor<'_> {
    fn visit(&mut self, declaration: &MethodDeclaration) -> ValidationOutcome {
        let outcome = self.validator.validate(declaration, self.handler);

        if let ValidationOutcome::Valid(record) = &outcome {
            self.accumulator.push(record.clone());
        }

        outcome
    }
}
