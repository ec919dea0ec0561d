//! Contains the loading of the declaration dumps handed over by the syntax
//! facility, one per compilation unit.

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use peregrinec_route::declaration::MethodDeclaration;
use peregrinec_source_file::{self as source_file, SourceFile, SourceID, SourceMap};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The declarations of one compilation unit, as written by the syntax
/// facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationDump {
    /// The source file the declarations were found in. A relative path is
    /// resolved against the directory of the dump.
    pub source: PathBuf,

    /// The candidate declarations in the order they appear in the source.
    #[serde(default)]
    pub declarations: Vec<MethodDeclaration>,
}

/// An error that occurs when loading a compilation unit.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("malformed declaration dump {}: {source}", .path.display())]
    Parse { path: PathBuf, source: serde_json::Error },

    #[error("failed to load the source file {}: {source}", .path.display())]
    Source { path: PathBuf, source: source_file::Error },
}

/// Decides which source files belong to the user rather than to the
/// toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceFilter {
    excluded: Vec<String>,
}

impl SourceFilter {
    /// Creates a filter skipping every path containing one of the fragments.
    #[must_use]
    pub const fn new(excluded: Vec<String>) -> Self { Self { excluded } }

    /// Checks whether the source at the given path should be validated.
    #[must_use]
    pub fn is_user_source(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();

        !path.is_empty()
            && !self
                .excluded
                .iter()
                .any(|fragment| !fragment.is_empty() && path.contains(fragment))
    }
}

/// A compilation unit whose source file has been registered in the
/// [`SourceMap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    /// The ID of the registered source file.
    pub source_id: SourceID,

    /// The declarations, with their spans pointing into the registered
    /// source file.
    pub declarations: Vec<MethodDeclaration>,
}

fn resolve_source_path(dump_path: &Path, source: &Path) -> PathBuf {
    if source.is_absolute() {
        return source.to_owned();
    }

    dump_path
        .parent()
        .map_or_else(|| source.to_owned(), |directory| directory.join(source))
}

/// Loads the dump at the given path and registers its source file.
///
/// Returns `Ok(None)` when the source file is filtered out; nothing is
/// registered in that case.
///
/// # Errors
///
/// See [`Error`].
pub fn load(
    dump_path: &Path,
    filter: &SourceFilter,
    source_map: &mut SourceMap,
) -> Result<Option<CompilationUnit>, Error> {
    let content = std::fs::read_to_string(dump_path).map_err(|source| {
        Error::Read { path: dump_path.to_owned(), source }
    })?;

    let dump: DeclarationDump =
        serde_json::from_str(&content).map_err(|source| Error::Parse {
            path: dump_path.to_owned(),
            source,
        })?;

    let source_path = resolve_source_path(dump_path, &dump.source);

    if !filter.is_user_source(&source_path) {
        log::debug!("skipping {}", source_path.display());
        return Ok(None);
    }

    let file = File::open(&source_path).map_err(|source| Error::Read {
        path: source_path.clone(),
        source,
    })?;
    let source_file = SourceFile::load(file, source_path.clone())
        .map_err(|source| Error::Source { path: source_path, source })?;

    let source_id = source_map.register(source_file);

    Ok(Some(CompilationUnit {
        source_id,
        declarations: dump
            .declarations
            .into_iter()
            .map(|declaration| declaration.with_source_id(source_id))
            .collect(),
    }))
}
