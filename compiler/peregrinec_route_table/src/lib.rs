//! Persists route records into the `routers.json` route table.
//!
//! The table is a JSON array of `{ "url", "class", "selector" }` objects read
//! by the runtime router. Merging is lenient: a missing, empty or malformed
//! table is treated as empty, and new records replace the entries sharing
//! their [`DedupKey`] instead of being appended next to them.

use std::{
    fs,
    path::{Path, PathBuf},
};

use derive_new::new;
use getset::{CopyGetters, Getters};
use peregrinec_route::record::RouteRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The file name of the route table inside the output directory.
pub const FILE_NAME: &str = "routers.json";

/// A single entry of the persisted route table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RouteEntry {
    /// The route path.
    #[serde(default)]
    pub url: String,

    /// The type declaring the handler.
    #[serde(default)]
    pub class: String,

    /// The selector of the handler.
    #[serde(default)]
    pub selector: String,

    /// Any other field found in the existing table; kept as is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl From<&RouteRecord> for RouteEntry {
    fn from(record: &RouteRecord) -> Self {
        Self {
            url: record.path().clone(),
            class: record.owner_type().clone(),
            selector: record.handler_signature().clone(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Decides which existing entry a new record replaces.
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
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum DedupKey {
    /// Entries are keyed by their route path: a handler claiming a path
    /// takes it over from whichever handler had it before.
    #[default]
    Path,

    /// Entries are keyed by their type and selector: a handler changing its
    /// path drops its previous path.
    Handler,
}

impl DedupKey {
    /// Checks whether the entry and the record share the same key.
    #[must_use]
    pub fn matches(self, entry: &RouteEntry, record: &RouteRecord) -> bool {
        match self {
            Self::Path => entry.url == *record.path(),
            Self::Handler => {
                entry.class == *record.owner_type()
                    && entry.selector == *record.handler_signature()
            }
        }
    }
}

/// What [`RouteTable::upsert`] did with a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Upsert {
    /// No entry shared the key; the record was appended.
    Appended,

    /// The given number of entries shared the key and were removed before
    /// the record was appended.
    Replaced(usize),
}

/// The in-memory route table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self { Self { entries: Vec::new() } }

    /// Gets the entries in their persisted order.
    #[must_use]
    pub fn entries(&self) -> &[RouteEntry] { &self.entries }

    /// Parses the table, treating empty or malformed content as an empty
    /// table.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        if content.trim().is_empty() {
            return Self::new();
        }

        match serde_json::from_str(content) {
            Ok(table) => table,
            Err(error) => {
                log::warn!("discarding malformed route table: {error}");
                Self::new()
            }
        }
    }

    /// Reads the table at the given path. A file that can't be read is
    /// treated as an empty table.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(error) => {
                log::debug!(
                    "no route table read from {}: {error}",
                    path.display()
                );
                Self::new()
            }
        }
    }

    /// Removes every entry sharing the record's key, then appends the record.
    pub fn upsert(&mut self, record: &RouteRecord, key: DedupKey) -> Upsert {
        let before = self.entries.len();
        self.entries.retain(|entry| !key.matches(entry, record));
        let removed = before - self.entries.len();

        self.entries.push(record.into());

        if removed == 0 {
            Upsert::Appended
        } else {
            Upsert::Replaced(removed)
        }
    }

    /// Serializes the table as pretty-printed JSON, ending with a newline.
    ///
    /// # Errors
    ///
    /// See [`serde_json::to_string_pretty`].
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');

        Ok(json)
    }
}

/// An error that occurs while writing the route table.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("failed to create the output directory {}: {source}", .path.display())]
    CreateDirectory { path: PathBuf, source: std::io::Error },

    #[error("failed to serialize the route table: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write the route table {}: {source}", .path.display())]
    Write { path: PathBuf, source: std::io::Error },
}

/// Describes what a merge did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MergeSummary {
    /// There was nothing to merge; the table wasn't touched.
    Skipped,

    /// The table was rewritten.
    Written {
        /// The number of existing entries replaced by new records.
        replaced: usize,

        /// The number of records appended without replacing anything.
        appended: usize,

        /// The number of entries in the written table.
        total: usize,
    },
}

/// Merges route records into the route table of an output directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, CopyGetters, new)]
pub struct Merger {
    /// The directory containing the route table.
    #[get = "pub"]
    directory: PathBuf,

    /// The key deciding which entries are replaced.
    #[get_copy = "pub"]
    dedup_key: DedupKey,
}

impl Merger {
    /// Gets the path of the route table file.
    #[must_use]
    pub fn table_path(&self) -> PathBuf { self.directory.join(FILE_NAME) }

    /// Merges the records into the persisted table and rewrites it.
    ///
    /// Without any record no I/O is performed at all. The existing table is
    /// read leniently; only creating the directory and writing the table can
    /// fail.
    ///
    /// # Errors
    ///
    /// See [`Error`].
    pub fn merge(&self, records: &[RouteRecord]) -> Result<MergeSummary, Error> {
        if records.is_empty() {
            return Ok(MergeSummary::Skipped);
        }

        fs::create_dir_all(&self.directory).map_err(|source| {
            Error::CreateDirectory { path: self.directory.clone(), source }
        })?;

        let path = self.table_path();
        let mut table = RouteTable::load(&path);

        let mut replaced = 0;
        let mut appended = 0;

        for record in records {
            match table.upsert(record, self.dedup_key) {
                Upsert::Appended => appended += 1,
                Upsert::Replaced(count) => replaced += count,
            }
        }

        let json = table.to_pretty_json()?;
        fs::write(&path, json)
            .map_err(|source| Error::Write { path: path.clone(), source })?;

        log::info!("wrote {} route(s) to {}", table.entries.len(), path.display());

        Ok(MergeSummary::Written {
            replaced,
            appended,
            total: table.entries.len(),
        })
    }
}

#[cfg(test)]
mod test;
