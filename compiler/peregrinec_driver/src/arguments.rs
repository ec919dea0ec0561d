//! Contains the command line [`Arguments`] of the program.

use std::path::PathBuf;

use peregrinec_route::contract::RouteContract;
use peregrinec_route_table::DedupKey;
use serde::{Deserialize, Serialize};

/// The routing attribute flavours the program knows about.
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
#[serde(rename_all = "kebab-case")]
pub enum ContractPreset {
    /// `peregrine_target`, requiring a `PGRouterContext *` parameter.
    #[default]
    PeregrineTarget,

    /// `routable`, with an optional `RouteContext *` parameter.
    Routable,
}

impl ContractPreset {
    /// Gets the contract of the preset.
    #[must_use]
    pub fn contract(self) -> RouteContract {
        match self {
            Self::PeregrineTarget => RouteContract::peregrine_target(),
            Self::Routable => RouteContract::routable(),
        }
    }
}

/// The arguments to the program.
#[derive(Debug, Clone, PartialEq, Eq, clap::Parser)]
#[clap(
    name = "peregrinec",
    about = "Validates route handler declarations and generates the route \
             table",
    author = "Simmypeet"
)]
pub struct Arguments {
    /// The declaration dumps produced by the syntax facility, one per
    /// compilation unit.
    pub inputs: Vec<PathBuf>,

    /// The directory `routers.json` is read from and written to. If not
    /// specified, the current working directory is used.
    #[clap(short = 'p', long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Which field(s) identify a route when merging into the table.
    #[clap(long, value_enum)]
    pub dedup_key: Option<DedupKey>,

    /// The routing attribute flavour to validate against.
    #[clap(long, value_enum)]
    pub contract: Option<ContractPreset>,

    /// Overrides the name of the routing attribute.
    #[clap(long)]
    pub attribute: Option<String>,

    /// Overrides the name of the context parameter type.
    #[clap(long)]
    pub context_type: Option<String>,

    /// The TOML configuration file to read.
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Exits with a failure status when an error diagnostic was reported.
    #[clap(long)]
    pub fail_on_error: bool,
}
