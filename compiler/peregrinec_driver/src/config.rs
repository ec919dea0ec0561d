//! Contains the TOML configuration file and the resolution of the settings
//! used for a run.

use std::path::{Path, PathBuf};

use peregrinec_route::contract::RouteContract;
use peregrinec_route_table::DedupKey;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::arguments::{Arguments, ContractPreset};

/// The fragment identifying sources of the toolchain rather than of the user.
pub const DEFAULT_EXCLUDE: &str = "/Applications/Xcode";

/// The `[contract]` table of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContractConfig {
    /// The preset the other fields are applied on.
    pub preset: Option<ContractPreset>,

    /// Overrides the routing attribute name.
    pub attribute_name: Option<String>,

    /// Overrides the context type name.
    pub context_type_name: Option<String>,
}

/// The `[table]` table of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// The key identifying routes while merging.
    pub dedup_key: Option<DedupKey>,
}

/// The configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The directory of the route table.
    pub output_dir: Option<PathBuf>,

    /// Sources whose path contains any of these fragments are skipped.
    pub exclude: Option<Vec<String>>,

    /// The contract of the route handlers.
    pub contract: ContractConfig,

    /// The route table settings.
    pub table: TableConfig,
}

/// An error that occurs when reading the configuration file.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("failed to read the configuration {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("invalid configuration {}: {source}", .path.display())]
    Parse { path: PathBuf, source: toml::de::Error },
}

impl Config {
    /// Loads the configuration file at the given path.
    ///
    /// # Errors
    ///
    /// See [`Error`].
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| Error::Read { path: path.to_owned(), source })?;

        toml::from_str(&content)
            .map_err(|source| Error::Parse { path: path.to_owned(), source })
    }
}

/// The settings of a run, after applying the command line over the
/// configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// The contract the declarations are validated against.
    pub contract: RouteContract,

    /// The key identifying routes while merging.
    pub dedup_key: DedupKey,

    /// The directory of the route table.
    pub output_dir: PathBuf,

    /// Sources whose path contains any of these fragments are skipped.
    pub exclude: Vec<String>,

    /// Whether error diagnostics fail the run.
    pub fail_on_error: bool,
}

impl Settings {
    /// Resolves the settings; command line values take precedence over the
    /// configuration file.
    #[must_use]
    pub fn resolve(arguments: &Arguments, config: Config) -> Self {
        let preset = arguments
            .contract
            .or(config.contract.preset)
            .unwrap_or_default();

        let mut contract = preset.contract();

        if let Some(name) = arguments
            .attribute
            .clone()
            .or(config.contract.attribute_name)
        {
            contract = contract.with_attribute_name(name);
        }

        if let Some(name) = arguments
            .context_type
            .clone()
            .or(config.contract.context_type_name)
        {
            contract = contract.with_context_type_name(name);
        }

        Self {
            contract,
            dedup_key: arguments
                .dedup_key
                .or(config.table.dedup_key)
                .unwrap_or_default(),
            output_dir: arguments
                .output_dir
                .clone()
                .or(config.output_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            exclude: config
                .exclude
                .unwrap_or_else(|| vec![DEFAULT_EXCLUDE.to_owned()]),
            fail_on_error: arguments.fail_on_error,
        }
    }
}
