//! CLI command implementations.

mod adjacency;
mod build;
mod check;
mod tree;

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};

pub(crate) use adjacency::AdjacencyArgs;
pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;
pub(crate) use tree::TreeArgs;

use crate::error::CliError;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct ProjectArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// Only process this docs instance.
    #[arg(long)]
    docs: Option<String>,
}

impl ProjectArgs {
    /// Load configuration, applying the docs filter and extra overrides.
    pub(crate) fn load_config(&self, settings: CliSettings) -> Result<Config, CliError> {
        let settings = CliSettings {
            docs: self.docs.clone(),
            ..settings
        };
        Ok(Config::load(self.config.as_deref(), Some(&settings))?)
    }
}
