//! Contains the definition of the [`Diagnostic`] struct and related types.

use std::fmt::{self, Display};

use enum_as_inner::EnumAsInner;
use peregrinec_log::{Message, Severity, SourceCodeDisplay};
use peregrinec_source_file::{LocalSpan, SourceMap};
use serde::{Deserialize, Serialize};

/// Implement this trait for a type that can report a diagnostic.
///
/// This trait is typically implemented by structs or enums that encode the
/// error or warning conditions found while checking the input. Keeping them
/// apart from the rendered [`Diagnostic`] lets the checks stay independent of
/// how the diagnostic is eventually shown.
pub trait Report<Param> {
    /// The error type that can be returned when creating a diagnostic.
    type Error;

    /// Creates a diagnostic.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] when the parameter lacks information required
    /// to build the diagnostic.
    fn report(&self, parameter: Param) -> Result<Diagnostic, Self::Error>;
}

/// A suggested edit of the source text attached to a [`Diagnostic`].
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
    EnumAsInner,
)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FixIt {
    /// Replaces the text covered by `span` with `text`.
    Replacement {
        /// The region being replaced.
        span: LocalSpan,

        /// The text to put in place of the region.
        text: String,
    },

    /// Inserts `text` at the zero-width `at` location.
    Insertion {
        /// The insertion point.
        at: LocalSpan,

        /// The text to insert.
        text: String,
    },
}

impl FixIt {
    /// Gets the region the fix-it applies to. For insertions the region is
    /// empty.
    #[must_use]
    pub const fn span(&self) -> &LocalSpan {
        match self {
            Self::Replacement { span, .. } => span,
            Self::Insertion { at, .. } => at,
        }
    }

    /// Gets the text written by the fix-it.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Replacement { text, .. } | Self::Insertion { text, .. } => {
                text
            }
        }
    }

    /// Applies the edit to the given content, returning `None` if the region
    /// doesn't fit inside the content.
    #[must_use]
    pub fn apply(&self, content: &str) -> Option<String> {
        let range = self.span().range();

        if range.end > content.len()
            || !content.is_char_boundary(range.start)
            || !content.is_char_boundary(range.end)
        {
            return None;
        }

        let mut result = content.to_owned();
        result.replace_range(range, self.text());

        Some(result)
    }
}

impl Display for FixIt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replacement { text, .. } => {
                write!(f, "fix-it: replace with `{text}`")
            }
            Self::Insertion { text, .. } => write!(f, "fix-it: insert `{text}`"),
        }
    }
}

/// A struct containing all the information required to display the diagnostic
/// to the user.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Diagnostic {
    /// The span location where the diagnostic occurred.
    pub span: LocalSpan,

    /// The message to display to the user.
    pub message: String,

    /// The severity of the diagnostic.
    pub severity: Severity,

    /// The optional help message to display to the user. This will be
    /// displayed alongside the main message.
    pub help_message: Option<String>,

    /// List of related useful information to display to the user.
    pub related: Vec<Related>,

    /// The suggested edit that resolves the diagnostic, if one can be
    /// determined mechanically.
    pub fix_it: Option<FixIt>,
}

/// The related information that is displayed alongside the main [`Diagnostic`].
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Related {
    /// The span location to display the message.
    pub span: LocalSpan,

    /// The message to display to the user.
    pub message: String,
}

impl Diagnostic {
    /// Pairs the diagnostic with the source map its spans point into so that
    /// it can be displayed.
    #[must_use]
    pub const fn display<'a>(
        &'a self,
        source_map: &'a SourceMap,
    ) -> WithSourceMap<'a> {
        WithSourceMap { diagnostic: self, source_map }
    }
}

/// A [`Diagnostic`] paired with its [`SourceMap`]; implements [`Display`].
#[derive(Debug, Clone, Copy)]
pub struct WithSourceMap<'a> {
    diagnostic: &'a Diagnostic,
    source_map: &'a SourceMap,
}

impl WithSourceMap<'_> {
    fn snippet(
        &self,
        f: &mut fmt::Formatter<'_>,
        span: &LocalSpan,
        help: Option<&str>,
    ) -> fmt::Result {
        let source_file =
            self.source_map.get(span.source_id).ok_or(fmt::Error)?;

        write!(
            f,
            "\n{}",
            SourceCodeDisplay::new(source_file, span.start, span.end, help)
        )
    }
}

impl Display for WithSourceMap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diagnostic = self.diagnostic;

        write!(f, "{}", Message::new(diagnostic.severity, &diagnostic.message))?;
        self.snippet(f, &diagnostic.span, diagnostic.help_message.as_deref())?;

        for related in &diagnostic.related {
            self.snippet(f, &related.span, Some(&related.message))?;
        }

        if let Some(fix_it) = &diagnostic.fix_it {
            self.snippet(f, fix_it.span(), Some(&fix_it.to_string()))?;
        }

        Ok(())
    }
}
