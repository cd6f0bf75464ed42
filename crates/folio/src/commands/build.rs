//! `folio build` command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use folio_config::CliSettings;
use folio_nav::{DocumentId, DocumentLinks, Manifest, Validator};
use serde::Serialize;

use super::ProjectArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::project::Instance;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Output directory for manifests (default: .folio/build/ next to folio.toml).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

/// Manifest file written for one docs instance.
#[derive(Serialize)]
struct InstanceManifest<'a> {
    docs: &'a str,
    route_base_path: &'a str,
    #[serde(flatten)]
    manifest: Manifest,
    pages: Vec<PageInfo>,
}

/// Presentation data of one content page.
#[derive(Serialize)]
struct PageInfo {
    id: DocumentId,
    permalink: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    edit_url: Option<String>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.project.load_config(CliSettings::default())?;
        let validator = Validator::new().with_broken_links(config.site.on_broken_links);

        let output_dir = self.output_dir.unwrap_or_else(|| {
            config
                .config_path
                .as_deref()
                .and_then(Path::parent)
                .unwrap_or(Path::new("."))
                .join(".folio/build")
        });
        fs::create_dir_all(&output_dir)?;

        for docs in &config.docs {
            let instance = Instance::load(docs)?;
            let report = validator.validate_par(&instance.sidebars, &instance.content)?;
            for warning in report.warnings() {
                output.warning(&format!("warning: {warning}"));
            }

            let path = output_dir.join(format!("{}.json", docs.id));
            let json = serde_json::to_string_pretty(&instance_manifest(&instance))?;
            fs::write(&path, json)?;
            output.info(&format!("Wrote {}", path.display()));
        }

        output.success(&format!(
            "Manifests built successfully to {}",
            output_dir.display()
        ));
        Ok(())
    }
}

fn instance_manifest<'a>(instance: &'a Instance<'_>) -> InstanceManifest<'a> {
    let links = instance.links();
    let pages = instance
        .content
        .iter()
        .map(|entry| PageInfo {
            id: entry.id.clone(),
            permalink: instance.docs.permalink(&entry.id),
            title: links.title(&entry.id),
            edit_url: links.edit_link(&entry.id),
        })
        .collect();

    InstanceManifest {
        docs: &instance.docs.id,
        route_base_path: &instance.docs.route_base_path,
        manifest: Manifest::build(&instance.sidebars, &links),
        pages,
    }
}
