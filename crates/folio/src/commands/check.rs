//! `folio check` command implementation.

use clap::Args;
use folio_config::CliSettings;
use folio_nav::{BrokenLinkPolicy, Validator};

use super::ProjectArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::project::Instance;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// How to treat sidebar entries without a page: throw, warn or ignore
    /// (overrides config).
    #[arg(long)]
    broken_links: Option<BrokenLinkPolicy>,
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.project.load_config(CliSettings {
            broken_links: self.broken_links,
            ..CliSettings::default()
        })?;
        let validator = Validator::new().with_broken_links(config.site.on_broken_links);

        let mut warnings = 0;
        for docs in &config.docs {
            output.heading(&docs.id);
            let instance = Instance::load(docs)?;
            let report = validator.validate_par(&instance.sidebars, &instance.content)?;

            for warning in report.warnings() {
                output.warning(&format!("  warning: {warning}"));
            }
            warnings += report.warnings().len();

            let unlisted = instance.content.unlisted_documents(&instance.sidebars);
            for entry in &unlisted {
                tracing::info!(
                    docs = %docs.id,
                    document = %entry.id,
                    source = %entry.source.display(),
                    "Document is not listed in any sidebar"
                );
            }

            output.info(&format!(
                "  {} sidebars, {} pages, {} unlisted",
                instance.sidebars.len(),
                instance.content.len(),
                unlisted.len()
            ));
        }

        if warnings == 0 {
            output.success("Navigation is valid");
        } else {
            output.success(&format!("Navigation is valid ({warnings} warnings)"));
        }
        Ok(())
    }
}
