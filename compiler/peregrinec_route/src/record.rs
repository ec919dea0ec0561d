//! Contains the [`RouteRecord`], the unit of information extracted from a
//! valid route handler.

use getset::Getters;

/// A route extracted from a valid handler declaration.
///
/// All three fields are non-empty; a record is never partially populated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
#[get = "pub"]
pub struct RouteRecord {
    /// The route path the runtime router looks the handler up by.
    path: String,

    /// The name of the type declaring the handler.
    owner_type: String,

    /// The canonical selector of the handler.
    handler_signature: String,
}

impl RouteRecord {
    /// Creates a new record, returning `None` if any of the fields is empty.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        owner_type: impl Into<String>,
        handler_signature: impl Into<String>,
    ) -> Option<Self> {
        let path = path.into();
        let owner_type = owner_type.into();
        let handler_signature = handler_signature.into();

        if path.is_empty() || owner_type.is_empty() || handler_signature.is_empty()
        {
            return None;
        }

        Some(Self { path, owner_type, handler_signature })
    }
}
