//! Contains the code related to the source code input.

use std::{
    cmp::Ordering,
    fmt::Debug,
    fs::File,
    io::Read,
    ops::{Index, Range},
    path::PathBuf,
};

use getset::Getters;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represents an error that occurs when loading/creating a source file.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),
}

/// Represents an source file input for the compiler.
#[derive(Clone, PartialEq, Eq, Hash, Getters)]
pub struct SourceFile {
    content: String,

    /// Gets the full path to the source file.
    #[get = "pub"]
    full_path: PathBuf,

    /// The byte ranges for each line in the source file (including the
    /// newline)
    lines: Vec<Range<usize>>,
}

impl AsRef<str> for SourceFile {
    fn as_ref(&self) -> &str { &self.content }
}

impl PartialOrd for SourceFile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SourceFile {
    fn cmp(&self, other: &Self) -> Ordering {
        self.full_path
            .cmp(&other.full_path)
            .then(self.content.cmp(&other.content))
    }
}

#[allow(clippy::missing_fields_in_debug)]
impl Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("full_path", &self.full_path)
            .field("lines", &self.lines)
            .finish()
    }
}

impl SourceFile {
    /// Creates a new inline source file
    #[must_use]
    pub fn new(content: String, full_path: PathBuf) -> Self {
        let lines = get_line_byte_positions(&content);
        Self { content, full_path, lines }
    }

    /// Gets the content of the source file.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn content(&self) -> &str { &self.content }

    /// Determines in which line number the given byte index is located (0
    /// indexed).
    #[must_use]
    pub fn get_line_of_byte_index(
        &self,
        byte_index: ByteIndex,
    ) -> Option<usize> {
        // the end of the content belongs to the last line
        if byte_index == self.content.len() {
            return Some(self.lines.len() - 1);
        }

        self.lines
            .binary_search_by(|range| {
                if range.contains(&byte_index) {
                    Ordering::Equal
                } else if byte_index < range.start {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            })
            .ok()
    }

    /// Gets the line of the source file at the given line number.
    ///
    /// The line number starts at 0.
    #[must_use]
    pub fn get_line(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(|range| &self.content[range.clone()])
    }

    /// Gets the number of lines in the source file.
    #[must_use]
    pub fn line_count(&self) -> usize { self.lines.len() }

    /// Loads the source file from the given file path.
    ///
    /// # Errors
    /// - [`Error::Io`]: Error occurred when reading the file.
    /// - [`Error::Utf8`]: Error occurred when converting the read bytes to a
    ///   string.
    pub fn load(mut file: File, path: PathBuf) -> Result<Self, Error> {
        let mut string = Vec::new();
        file.read_to_end(&mut string)?;

        let string = String::from_utf8(string).map_err(|x| x.utf8_error())?;

        Ok(Self::new(string, path))
    }

    /// Gets the [`Location`] of the given byte index.
    #[must_use]
    pub fn get_location(&self, byte_index: ByteIndex) -> Option<Location> {
        if !self.content.is_char_boundary(byte_index) {
            return None;
        }

        let line = self.get_line_of_byte_index(byte_index)?;
        let line_starting_byte_index = self.lines[line].start;
        let line_str = self.get_line(line)?;

        // gets the column number by iterating through the utf-8 characters
        let column = line_str
            .char_indices()
            .take_while(|(i, _)| *i + line_starting_byte_index < byte_index)
            .count();

        Some(Location { line, column })
    }
}

/// Is an unsigned integer that represents a byte index in the source code.
pub type ByteIndex = usize;

/// Identifies a [`SourceFile`] registered in a [`SourceMap`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct SourceID(pub u32);

/// Represents a range of characters in a source file.
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
#[serde(bound(deserialize = "ID: Deserialize<'de> + Default"))]
pub struct Span<ID> {
    /// Gets the start byte index of the span.
    pub start: ByteIndex,

    /// Gets the end byte index of the span (exclusive).
    pub end: ByteIndex,

    /// The ID of the source file that this span belongs to. Serialized spans
    /// may leave it out and be re-targeted once their file is registered.
    #[serde(default)]
    pub source_id: ID,
}

/// A type alias for the [`Span`] type pointing into a [`SourceMap`].
pub type LocalSpan = Span<SourceID>;

/// Is a struct pointing to a particular location in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Location {
    /// The line number of the location (starts at 0).
    pub line: usize,

    /// The column number of the location (starts at 0).
    pub column: usize,
}

impl Location {
    /// Creates a new location with the given line and column numbers.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl<ID> Span<ID> {
    /// Creates a span from the given start and end byte indices in the source
    /// file.
    #[must_use]
    pub fn new(start: ByteIndex, end: ByteIndex, source_id: ID) -> Self {
        assert!(start <= end, "start index is greater than end index");

        Self { start, end, source_id }
    }

    /// Creates a zero-width span located at the given byte index.
    #[must_use]
    pub const fn point(at: ByteIndex, source_id: ID) -> Self {
        Self { start: at, end: at, source_id }
    }

    /// Returns a zero-width span located right after the end of this span.
    #[must_use]
    pub fn end_point(&self) -> Self
    where
        ID: Clone,
    {
        Self { start: self.end, end: self.end, source_id: self.source_id.clone() }
    }

    /// Gets the byte range of the span.
    #[must_use]
    pub const fn range(&self) -> Range<ByteIndex> { self.start..self.end }

    /// Checks whether the span covers no character at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool { self.start == self.end }
}

fn get_line_byte_positions(text: &str) -> Vec<Range<usize>> {
    let mut current_position = 0;
    let mut results = Vec::new();

    let mut skip = false;

    for (byte, char) in text.char_indices() {
        if skip {
            skip = false;
            continue;
        }

        // ordinary lf
        if char == '\n' {
            #[allow(clippy::range_plus_one)]
            results.push(current_position..byte + 1);

            current_position = byte + 1;
        }

        // crlf
        if char == '\r' {
            if text.as_bytes().get(byte + 1) == Some(&b'\n') {
                #[allow(clippy::range_plus_one)]
                results.push(current_position..byte + 2);

                current_position = byte + 2;

                skip = true;
            } else {
                #[allow(clippy::range_plus_one)]
                results.push(current_position..byte + 1);

                current_position = byte + 1;
            }
        }
    }

    results.push(current_position..text.len());

    results
}

/// A map of the source files taking part in one compilation run, accessed
/// through [`SourceID`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceMap {
    source_files: Vec<SourceFile>,
}

impl SourceMap {
    /// Creates a new empty [`SourceMap`].
    #[must_use]
    pub const fn new() -> Self { Self { source_files: Vec::new() } }

    /// Registers a source file in the map and returns its freshly assigned
    /// [`SourceID`].
    #[allow(clippy::cast_possible_truncation)]
    pub fn register(&mut self, source: SourceFile) -> SourceID {
        let id = SourceID(self.source_files.len() as u32);
        self.source_files.push(source);
        id
    }

    /// Gets the source file by its ID.
    #[must_use]
    pub fn get(&self, id: SourceID) -> Option<&SourceFile> {
        self.source_files.get(id.0 as usize)
    }

    /// Gets the number of registered source files.
    #[must_use]
    pub fn len(&self) -> usize { self.source_files.len() }

    /// Checks whether no source file has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.source_files.is_empty() }
}

impl Index<SourceID> for SourceMap {
    type Output = SourceFile;

    fn index(&self, id: SourceID) -> &Self::Output {
        &self.source_files[id.0 as usize]
    }
}
