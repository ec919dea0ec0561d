//! Contains all the violations of the route contract that can be reported
//! while validating a declaration.

use std::convert::Infallible;

use enum_as_inner::EnumAsInner;
use peregrinec_diagnostic::{Diagnostic, FixIt, Related, Report};
use peregrinec_log::Severity;
use peregrinec_source_file::LocalSpan;

use crate::{contract::RouteContract, declaration::TypeDescriptor};

/// Enumeration of every kind of violation, as used when talking about a
/// violation without its details.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum ViolationKind {
    WrongScope,
    NonVoidReturn,
    MissingContextParameter,
    WrongParameterType,
    TooManyParameters,
    MissingBody,
    MissingRoutePath,
}

/// The handler is declared as an instance method.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WrongScope {
    /// The span of the instance-scope marker.
    pub scope_span: LocalSpan,
}

impl WrongScope {
    fn fix_it(&self, contract: &RouteContract) -> FixIt {
        FixIt::Replacement {
            span: self.scope_span,
            text: contract.type_scope_marker().clone(),
        }
    }
}

impl Report<&RouteContract> for WrongScope {
    type Error = Infallible;

    fn report(
        &self,
        contract: &RouteContract,
    ) -> Result<Diagnostic, Self::Error> {
        Ok(Diagnostic {
            span: self.scope_span,
            message: "Should not be instance method.".to_owned(),
            severity: Severity::Error,
            help_message: Some(format!(
                "route handlers are dispatched on the type, declare it with \
                 `{}`",
                contract.type_scope_marker()
            )),
            related: Vec::new(),
            fix_it: Some(self.fix_it(contract)),
        })
    }
}

/// The handler returns a value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonVoidReturn {
    /// The declared return type.
    pub return_type: TypeDescriptor,
}

impl NonVoidReturn {
    fn fix_it(&self, contract: &RouteContract) -> FixIt {
        FixIt::Replacement {
            span: self.return_type.span,
            text: contract.void_type_name().clone(),
        }
    }
}

impl Report<&RouteContract> for NonVoidReturn {
    type Error = Infallible;

    fn report(
        &self,
        contract: &RouteContract,
    ) -> Result<Diagnostic, Self::Error> {
        Ok(Diagnostic {
            span: self.return_type.span,
            message: "Should not return a value".to_owned(),
            severity: Severity::Warning,
            help_message: Some(format!(
                "returns `{}`",
                self.return_type.spelling
            )),
            related: Vec::new(),
            fix_it: Some(self.fix_it(contract)),
        })
    }
}

/// The handler declares no parameter at all.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MissingContextParameter {
    /// The insertion point right after the method name.
    pub insertion_point: LocalSpan,
}

impl MissingContextParameter {
    fn fix_it(&self, contract: &RouteContract) -> FixIt {
        FixIt::Insertion {
            at: self.insertion_point,
            text: contract.context_parameter_insertion(),
        }
    }
}

impl Report<&RouteContract> for MissingContextParameter {
    type Error = Infallible;

    fn report(
        &self,
        contract: &RouteContract,
    ) -> Result<Diagnostic, Self::Error> {
        Ok(Diagnostic {
            span: self.insertion_point,
            message: format!(
                "At least one parameter of type `{}` is needed",
                contract.context_type_spelling()
            ),
            severity: Severity::Error,
            help_message: None,
            related: Vec::new(),
            fix_it: Some(self.fix_it(contract)),
        })
    }
}

/// The first parameter is not of the context type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WrongParameterType {
    /// The declared type of the first parameter.
    pub parameter_type: TypeDescriptor,

    /// The span of the first parameter's name.
    pub parameter_name_span: LocalSpan,
}

impl WrongParameterType {
    fn fix_it(&self, contract: &RouteContract) -> FixIt {
        FixIt::Replacement {
            span: self.parameter_type.span,
            text: contract.context_type_spelling(),
        }
    }
}

impl Report<&RouteContract> for WrongParameterType {
    type Error = Infallible;

    fn report(
        &self,
        contract: &RouteContract,
    ) -> Result<Diagnostic, Self::Error> {
        Ok(Diagnostic {
            span: self.parameter_name_span,
            message: format!(
                "Incompatible pointer types sending `{}` to parameter of type \
                 `{}`",
                contract.context_type_spelling(),
                self.parameter_type.spelling
            ),
            severity: Severity::Warning,
            help_message: None,
            related: Vec::new(),
            fix_it: Some(self.fix_it(contract)),
        })
    }
}

/// The handler declares more than one parameter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TooManyParameters {
    /// The point right after the first parameter's name.
    pub after_first_parameter: LocalSpan,

    /// The number of declared parameters.
    pub count: usize,
}

impl Report<&RouteContract> for TooManyParameters {
    type Error = Infallible;

    fn report(&self, _: &RouteContract) -> Result<Diagnostic, Self::Error> {
        Ok(Diagnostic {
            span: self.after_first_parameter,
            message: "Supports only one parameter at most".to_owned(),
            severity: Severity::Warning,
            help_message: Some(format!(
                "{} parameters are declared, only the first one is passed",
                self.count
            )),
            related: Vec::new(),
            fix_it: None,
        })
    }
}

/// The handler is declared without an implementation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MissingBody {
    /// The span of the method name.
    pub name_span: LocalSpan,

    /// The span of the routing attribute claiming the path.
    pub attribute_span: LocalSpan,

    /// The route path of the handler.
    pub path: String,
}

impl Report<&RouteContract> for MissingBody {
    type Error = Infallible;

    fn report(&self, _: &RouteContract) -> Result<Diagnostic, Self::Error> {
        Ok(Diagnostic {
            span: self.name_span,
            message: format!(
                "Router path \"{}\" is valid, please provide an implementation",
                self.path
            ),
            severity: Severity::Warning,
            help_message: None,
            related: vec![Related {
                span: self.attribute_span,
                message: "the route is declared here".to_owned(),
            }],
            fix_it: None,
        })
    }
}

/// The routing attribute carries an empty path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MissingRoutePath {
    /// The span of the attribute.
    pub attribute_span: LocalSpan,
}

impl Report<&RouteContract> for MissingRoutePath {
    type Error = Infallible;

    fn report(
        &self,
        contract: &RouteContract,
    ) -> Result<Diagnostic, Self::Error> {
        Ok(Diagnostic {
            span: self.attribute_span,
            message: format!(
                "The `{}` attribute requires a route path",
                contract.attribute_name()
            ),
            severity: Severity::Error,
            help_message: None,
            related: Vec::new(),
            fix_it: None,
        })
    }
}

/// An enumeration containing all kinds of violations.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumAsInner,
    derive_more::From,
)]
#[allow(missing_docs)]
pub enum Violation {
    WrongScope(WrongScope),
    NonVoidReturn(NonVoidReturn),
    MissingContextParameter(MissingContextParameter),
    WrongParameterType(WrongParameterType),
    TooManyParameters(TooManyParameters),
    MissingBody(MissingBody),
    MissingRoutePath(MissingRoutePath),
}

impl Violation {
    /// Gets the kind of the violation.
    #[must_use]
    pub const fn kind(&self) -> ViolationKind {
        match self {
            Self::WrongScope(_) => ViolationKind::WrongScope,
            Self::NonVoidReturn(_) => ViolationKind::NonVoidReturn,
            Self::MissingContextParameter(_) => {
                ViolationKind::MissingContextParameter
            }
            Self::WrongParameterType(_) => ViolationKind::WrongParameterType,
            Self::TooManyParameters(_) => ViolationKind::TooManyParameters,
            Self::MissingBody(_) => ViolationKind::MissingBody,
            Self::MissingRoutePath(_) => ViolationKind::MissingRoutePath,
        }
    }

    /// Checks whether the violation prevents the route record from being
    /// produced.
    #[must_use]
    pub const fn is_hard(&self) -> bool {
        match self {
            Self::WrongScope(_)
            | Self::NonVoidReturn(_)
            | Self::MissingContextParameter(_)
            | Self::WrongParameterType(_)
            | Self::MissingRoutePath(_) => true,

            Self::TooManyParameters(_) | Self::MissingBody(_) => false,
        }
    }

    /// Gets the suggested edit resolving the violation, if there's one.
    #[must_use]
    pub fn fix_it(&self, contract: &RouteContract) -> Option<FixIt> {
        match self {
            Self::WrongScope(violation) => Some(violation.fix_it(contract)),
            Self::NonVoidReturn(violation) => Some(violation.fix_it(contract)),
            Self::MissingContextParameter(violation) => {
                Some(violation.fix_it(contract))
            }
            Self::WrongParameterType(violation) => {
                Some(violation.fix_it(contract))
            }
            Self::TooManyParameters(_)
            | Self::MissingBody(_)
            | Self::MissingRoutePath(_) => None,
        }
    }
}

impl Report<&RouteContract> for Violation {
    type Error = Infallible;

    fn report(
        &self,
        contract: &RouteContract,
    ) -> Result<Diagnostic, Self::Error> {
        match self {
            Self::WrongScope(violation) => violation.report(contract),
            Self::NonVoidReturn(violation) => violation.report(contract),
            Self::MissingContextParameter(violation) => {
                violation.report(contract)
            }
            Self::WrongParameterType(violation) => violation.report(contract),
            Self::TooManyParameters(violation) => violation.report(contract),
            Self::MissingBody(violation) => violation.report(contract),
            Self::MissingRoutePath(violation) => violation.report(contract),
        }
    }
}
