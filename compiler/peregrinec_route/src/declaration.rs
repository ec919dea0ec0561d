//! Contains the descriptor of a method declaration handed over by the syntax
//! facility.

use peregrinec_source_file::{LocalSpan, SourceID, Span};
use serde::{Deserialize, Serialize};

/// Whether a method is dispatched on the type or on its instances.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Declared with the type-scope marker (`+`).
    Type,

    /// Declared with the instance-scope marker (`-`).
    Instance,
}

/// A type as it is spelled in the source code.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TypeDescriptor {
    /// The textual spelling of the type e.g. `PGRouterContext *`.
    pub spelling: String,

    /// The span of the type token(s).
    pub span: LocalSpan,
}

/// A parameter of a method declaration.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Parameter {
    /// The selector keyword preceding the parameter. The first parameter is
    /// always introduced by the method name, so its label is ignored.
    #[serde(default)]
    pub label: Option<String>,

    /// The declared type of the parameter.
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,

    /// The declared name of the parameter.
    pub name: String,

    /// The span of the parameter name.
    pub name_span: LocalSpan,
}

/// The routing attribute attached to a method declaration.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RoutingAttribute {
    /// The attribute name e.g. `peregrine_target`.
    pub name: String,

    /// The route path given as the attribute argument.
    pub path: String,

    /// The span of the whole attribute.
    pub span: LocalSpan,
}

/// A method declaration as seen by the route validator.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MethodDeclaration {
    /// The first selector piece of the method.
    pub name: String,

    /// The span of the method name.
    pub name_span: LocalSpan,

    /// Whether the method is a type or an instance method.
    pub scope: Scope,

    /// The span of the scope marker.
    pub scope_span: LocalSpan,

    /// The declared return type.
    pub return_type: TypeDescriptor,

    /// The parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<Parameter>,

    /// Whether the declaration comes with an implementation body.
    pub has_body: bool,

    /// The name of the enclosing type.
    pub owner_type: String,

    /// The routing attribute, if any.
    #[serde(default)]
    pub attribute: Option<RoutingAttribute>,
}

impl MethodDeclaration {
    /// Gets the canonical selector of the method: the name alone when there
    /// is no parameter, otherwise every keyword followed by a colon e.g.
    /// `open:with:`.
    #[must_use]
    pub fn selector(&self) -> String {
        let Some((_, rest)) = self.parameters.split_first() else {
            return self.name.clone();
        };

        let mut selector = format!("{}:", self.name);

        for parameter in rest {
            if let Some(label) = &parameter.label {
                selector.push_str(label);
            }
            selector.push(':');
        }

        selector
    }

    /// Moves every span of the declaration into the given source file.
    ///
    /// Declaration dumps don't know which [`SourceID`] their source file gets
    /// assigned, so the spans are re-targeted once the file is registered.
    #[must_use]
    pub fn with_source_id(mut self, source_id: SourceID) -> Self {
        let relocate = |span: &mut Span<SourceID>| span.source_id = source_id;

        relocate(&mut self.name_span);
        relocate(&mut self.scope_span);
        relocate(&mut self.return_type.span);

        for parameter in &mut self.parameters {
            relocate(&mut parameter.ty.span);
            relocate(&mut parameter.name_span);
        }

        if let Some(attribute) = &mut self.attribute {
            relocate(&mut attribute.span);
        }

        self
    }
}
