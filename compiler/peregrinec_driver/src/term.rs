//! Contains the emission of diagnostics to the terminal.

use std::{fmt::Write as _, io::Write};

use peregrinec_diagnostic::Diagnostic;
use peregrinec_log::{Message, Severity};
use peregrinec_source_file::SourceMap;

/// Emits diagnostics and messages to a writer, keeping count of the errors.
pub struct ReportTerm<'a> {
    writer: &'a mut dyn Write,
    error_count: usize,
}

impl std::fmt::Debug for ReportTerm<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportTerm")
            .field("error_count", &self.error_count)
            .finish_non_exhaustive()
    }
}

impl<'a> ReportTerm<'a> {
    /// Creates a new [`ReportTerm`] emitting to the given writer.
    #[must_use]
    pub fn new(writer: &'a mut dyn Write) -> Self {
        Self { writer, error_count: 0 }
    }

    /// Gets the number of errors reported so far.
    #[must_use]
    pub const fn error_count(&self) -> usize { self.error_count }

    fn count(&mut self, severity: Severity) {
        if severity == Severity::Error {
            self.error_count += 1;
        }
    }

    /// Reports a single line message.
    pub fn report_message(&mut self, severity: Severity, message: &str) {
        self.count(severity);

        let _ = writeln!(self.writer, "{}", Message::new(severity, message));
    }

    /// Reports a diagnostic along with the source code it points at. Falls
    /// back to the bare message when the source code cannot be displayed.
    pub fn report_diagnostic(
        &mut self,
        diagnostic: &Diagnostic,
        source_map: &SourceMap,
    ) {
        self.count(diagnostic.severity);

        let mut rendered = String::new();
        if write!(rendered, "{}", diagnostic.display(source_map)).is_err() {
            rendered = Message::new(diagnostic.severity, &diagnostic.message)
                .to_string();
        }

        let _ = writeln!(self.writer, "{rendered}\n");
    }
}
