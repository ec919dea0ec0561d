//! Contains the [`Validator`] checking declarations against a
//! [`RouteContract`].

use enum_as_inner::EnumAsInner;
use getset::Getters;
use peregrinec_handler::Handler;

use crate::{
    contract::RouteContract,
    declaration::{MethodDeclaration, Scope},
    diagnostic::{
        MissingBody, MissingContextParameter, MissingRoutePath,
        NonVoidReturn, TooManyParameters, Violation, WrongParameterType,
        WrongScope,
    },
    record::RouteRecord,
};

/// The result of validating a single declaration.
#[derive(Debug, Clone, PartialEq, Eq, EnumAsInner)]
pub enum ValidationOutcome {
    /// Every hard check passed; the extracted route.
    Valid(RouteRecord),

    /// At least one hard check failed. The violations have already been
    /// sent to the handler.
    Rejected,

    /// The declaration carries no routing attribute recognized by the
    /// contract.
    NotApplicable,
}

/// Validates route handler declarations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters)]
pub struct Validator {
    /// The contract declarations are checked against.
    #[get = "pub"]
    contract: RouteContract,
}

impl Validator {
    /// Creates a validator enforcing the given contract.
    #[must_use]
    pub const fn new(contract: RouteContract) -> Self { Self { contract } }

    /// Checks the declaration against the contract.
    ///
    /// Every violation found is sent to the `handler`, the hard ones as well
    /// as the advisory ones; the outcome only reflects the hard ones.
    pub fn validate(
        &self,
        declaration: &MethodDeclaration,
        handler: &dyn Handler<Violation>,
    ) -> ValidationOutcome {
        let Some(attribute) = declaration
            .attribute
            .as_ref()
            .filter(|x| self.contract.recognizes(&x.name))
        else {
            return ValidationOutcome::NotApplicable;
        };

        let mut valid = true;
        let mut report = |violation: Violation| {
            valid &= !violation.is_hard();
            handler.receive(violation);
        };

        if attribute.path.is_empty() {
            report(MissingRoutePath { attribute_span: attribute.span }.into());
        }

        if declaration.scope == Scope::Instance {
            report(WrongScope { scope_span: declaration.scope_span }.into());
        }

        if !self.contract.is_void(&declaration.return_type.spelling) {
            report(
                NonVoidReturn { return_type: declaration.return_type.clone() }
                    .into(),
            );
        }

        if let Some(first) = declaration.parameters.first() {
            if !self.contract.is_context_type(&first.ty.spelling) {
                report(
                    WrongParameterType {
                        parameter_type: first.ty.clone(),
                        parameter_name_span: first.name_span,
                    }
                    .into(),
                );
            }

            if declaration.parameters.len() > 1 {
                report(
                    TooManyParameters {
                        after_first_parameter: first.name_span.end_point(),
                        count: declaration.parameters.len(),
                    }
                    .into(),
                );
            }
        } else {
            report(
                MissingContextParameter {
                    insertion_point: declaration.name_span.end_point(),
                }
                .into(),
            );
        }

        if !declaration.has_body {
            report(
                MissingBody {
                    name_span: declaration.name_span,
                    attribute_span: attribute.span,
                    path: attribute.path.clone(),
                }
                .into(),
            );
        }

        if !valid {
            return ValidationOutcome::Rejected;
        }

        let Some(record) = RouteRecord::new(
            attribute.path.clone(),
            declaration.owner_type.clone(),
            declaration.selector(),
        ) else {
            log::warn!(
                "`{}` has no enclosing type name, the route \"{}\" is skipped",
                declaration.name,
                attribute.path
            );
            return ValidationOutcome::Rejected;
        };

        log::info!("found route \"{}\"", record.path());

        ValidationOutcome::Valid(record)
    }
}
