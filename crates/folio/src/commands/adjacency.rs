//! `folio adjacency` command implementation.

use clap::Args;
use folio_config::CliSettings;

use super::ProjectArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::project::Instance;

/// Arguments for the adjacency command.
#[derive(Args)]
pub(crate) struct AdjacencyArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Sidebar to compute previous/next links for.
    #[arg(long)]
    sidebar: String,
}

impl AdjacencyArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.project.load_config(CliSettings::default())?;

        let docs = match config.docs.as_slice() {
            [docs] => docs,
            _ => {
                return Err(CliError::Usage(
                    "--docs is required when the config has several docs instances".to_owned(),
                ));
            }
        };

        let instance = Instance::load(docs)?;
        let adjacency = instance.sidebar(&self.sidebar)?.adjacency();
        output.json(&adjacency)
    }
}
