//! Contains the [`RouteContract`], the calling convention a route handler
//! declaration has to follow.

use getset::Getters;
use serde::{Deserialize, Serialize};

/// Type qualifiers that don't change which type is named.
const QUALIFIERS: &[&str] = &[
    "const",
    "volatile",
    "oneway",
    "__strong",
    "__weak",
    "__unsafe_unretained",
    "__autoreleasing",
    "__kindof",
    "_Nonnull",
    "_Nullable",
    "_Null_unspecified",
    "__nonnull",
    "__nullable",
    "nonnull",
    "nullable",
];

/// Describes the shape a route handler declaration must have.
///
/// Both flavours of routing attributes in use are one configuration apart:
/// see [`RouteContract::peregrine_target`] and [`RouteContract::routable`].
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Getters,
)]
#[serde(default)]
pub struct RouteContract {
    /// The name of the attribute marking a route handler.
    #[get = "pub"]
    attribute_name: String,

    /// The name of the type every handler receives as its first parameter.
    #[get = "pub"]
    context_type_name: String,

    /// The spelling of the no-value return type.
    #[get = "pub"]
    void_type_name: String,

    /// The marker declaring a type-scope method.
    #[get = "pub"]
    type_scope_marker: String,
}

impl RouteContract {
    /// The contract of the `peregrine_target` attribute: exactly one
    /// `PGRouterContext *` parameter is expected.
    #[must_use]
    pub fn peregrine_target() -> Self {
        Self {
            attribute_name: "peregrine_target".to_owned(),
            context_type_name: "PGRouterContext".to_owned(),
            void_type_name: "void".to_owned(),
            type_scope_marker: "+".to_owned(),
        }
    }

    /// The contract of the `routable` attribute: exactly one
    /// `RouteContext *` parameter is expected.
    #[must_use]
    pub fn routable() -> Self {
        Self {
            attribute_name: "routable".to_owned(),
            context_type_name: "RouteContext".to_owned(),
            ..Self::peregrine_target()
        }
    }

    /// Replaces the attribute name recognized by the contract.
    #[must_use]
    pub fn with_attribute_name(mut self, name: impl Into<String>) -> Self {
        self.attribute_name = name.into();
        self
    }

    /// Replaces the expected context type name.
    #[must_use]
    pub fn with_context_type_name(mut self, name: impl Into<String>) -> Self {
        self.context_type_name = name.into();
        self
    }

    /// Checks whether an attribute with the given name marks a route
    /// handler under this contract.
    #[must_use]
    pub fn recognizes(&self, attribute_name: &str) -> bool {
        self.attribute_name == attribute_name
    }

    /// Checks whether the given type spelling names the no-value type e.g.
    /// `void` or `oneway void`, but not `void *`.
    #[must_use]
    pub fn is_void(&self, spelling: &str) -> bool {
        let mut tokens = spelling
            .split_whitespace()
            .filter(|token| !QUALIFIERS.contains(token));

        tokens.next() == Some(self.void_type_name.as_str())
            && tokens.next().is_none()
    }

    /// Checks whether the given type spelling names a pointer to the context
    /// type e.g. `PGRouterContext *` or `PGRouterContext *_Nonnull`.
    #[must_use]
    pub fn is_context_type(&self, spelling: &str) -> bool {
        let separated = spelling.replace('*', " * ");
        let mut tokens = separated
            .split_whitespace()
            .filter(|token| !QUALIFIERS.contains(token));

        tokens.next() == Some(self.context_type_name.as_str())
            && tokens.next() == Some("*")
            && tokens.next().is_none()
    }

    /// Gets the spelling of the context parameter type e.g.
    /// `PGRouterContext *`.
    #[must_use]
    pub fn context_type_spelling(&self) -> String {
        format!("{} *", self.context_type_name)
    }

    /// Gets the text inserted after the method name when the context
    /// parameter is missing.
    #[must_use]
    pub fn context_parameter_insertion(&self) -> String {
        format!(":({})context", self.context_type_spelling())
    }
}

impl Default for RouteContract {
    fn default() -> Self { Self::peregrine_target() }
}
