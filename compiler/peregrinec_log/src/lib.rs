//! Provides the types related to logging/printing messages to the console.

use std::fmt::{self, Display};

use colored::Colorize;
use derive_new::new;
use peregrinec_source_file::{ByteIndex, SourceFile};
use serde::{Deserialize, Serialize};

/// Represents the severity of a message printed to the console.
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
pub enum Severity {
    /// An error that should be fixed before the code is accepted.
    Error,

    /// A warning that does not block anything on its own.
    Warning,

    /// An informational message.
    Info,
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
            Self::Info => f.write_str("info"),
        }
    }
}

/// A severity-prefixed, single line message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Message<T> {
    /// The severity of the message.
    pub severity: Severity,

    /// The text of the message.
    pub display: T,
}

impl<T: Display> Display for Message<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = match self.severity {
            Severity::Error => "[error]:".bright_red().bold(),
            Severity::Warning => "[warning]:".yellow().bold(),
            Severity::Info => "[info]:".bright_green().bold(),
        };

        write!(f, "{header} {}", self.display.to_string().bold())
    }
}

/// Displays the source line(s) covered by a byte range, underlining the
/// range and optionally attaching a help message to it.
#[derive(Debug, Clone, Copy, new)]
pub struct SourceCodeDisplay<'a, T> {
    /// The source file the range points into.
    pub source_file: &'a SourceFile,

    /// The start byte index of the highlighted range.
    pub start: ByteIndex,

    /// The end byte index (exclusive) of the highlighted range.
    pub end: ByteIndex,

    /// The help message printed under the highlighted range.
    pub help_display: Option<T>,
}

const fn get_digit(mut number: usize) -> usize {
    let mut digit = 0;

    while number > 0 {
        number /= 10;
        digit += 1;
    }

    digit
}

impl<T: Display> Display for SourceCodeDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Some(start_location), Some(end_location)) = (
            self.source_file.get_location(self.start),
            self.source_file.get_location(self.end),
        ) else {
            return Err(fmt::Error);
        };

        let start_line = start_location.line;
        let end_line = end_location.line.max(start_line);

        // line numbers are shown one-based
        let largest_line_number_digits = get_digit(end_line + 1);
        let gutter = " ".repeat(largest_line_number_digits + 1);
        let pipe = "┃".bright_cyan().bold();

        writeln!(
            f,
            "{}{} {}:{}:{}",
            " ".repeat(largest_line_number_digits),
            "-->".bright_cyan().bold(),
            self.source_file.full_path().display(),
            start_location.line + 1,
            start_location.column + 1
        )?;
        writeln!(f, "{gutter}{pipe}")?;

        for line_number in start_line..=end_line {
            let Some(line) = self.source_file.get_line(line_number) else {
                return Err(fmt::Error);
            };
            let line = line.trim_end_matches(['\n', '\r']);

            writeln!(
                f,
                "{}{}{pipe} {}",
                (line_number + 1).to_string().bright_cyan().bold(),
                " ".repeat(
                    largest_line_number_digits - get_digit(line_number + 1)
                        + 1
                ),
                line.replace('\t', "    ")
            )?;

            let from =
                if line_number == start_line { start_location.column } else { 0 };
            let to = if line_number == end_line {
                end_location.column
            } else {
                line.chars().count()
            };

            // insertion points are drawn as a single caret
            let width = to.saturating_sub(from).max(1);
            let indent: String = line
                .chars()
                .take(from)
                .map(|c| if c == '\t' { "    " } else { " " })
                .collect();

            write!(
                f,
                "{gutter}{pipe} {indent}{}",
                "^".repeat(width).bright_red().bold()
            )?;

            if line_number == end_line {
                if let Some(help) = &self.help_display {
                    write!(f, " {}", help.to_string().bright_red())?;
                }
            } else {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test;
