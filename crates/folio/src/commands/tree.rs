//! `folio tree` command implementation.

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_nav::{NavigationNode, Sidebar, resolve_landing};

use super::ProjectArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::project::Instance;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Only print this sidebar (searched in every docs instance).
    #[arg(long)]
    sidebar: Option<String>,
}

impl TreeArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.project.load_config(CliSettings::default())?;

        let lines = tree_lines(&config, self.sidebar.as_deref(), &output)?;
        output.lines(lines)?;
        Ok(())
    }
}

/// Render every selected sidebar of every docs instance, each under a
/// `<docs>/<sidebar>` header.
fn tree_lines(
    config: &Config,
    sidebar_id: Option<&str>,
    output: &Output,
) -> Result<Vec<String>, CliError> {
    let mut lines = Vec::new();
    let mut matched = false;

    for docs in &config.docs {
        let instance = Instance::load(docs)?;
        let selected = instance
            .sidebars
            .iter()
            .filter(|sidebar| sidebar_id.is_none_or(|id| sidebar.id() == id));

        for sidebar in selected {
            matched = true;
            lines.push(format!("{}/{}", docs.id, sidebar.id()));
            lines.extend(render(sidebar, output));
        }
    }

    if let Some(id) = sidebar_id
        && !matched
    {
        return Err(CliError::NotFound(format!(
            "Sidebar '{id}' not found in any docs instance"
        )));
    }
    Ok(lines)
}

/// One line per node, indented by depth. Categories show their landing page.
fn render(sidebar: &Sidebar, output: &Output) -> Vec<String> {
    sidebar
        .flatten()
        .map(|entry| {
            let indent = "  ".repeat(entry.depth + 1);
            match entry.node {
                NavigationNode::Leaf(leaf) => match &leaf.label {
                    Some(label) => format!(
                        "{indent}- {label} {}",
                        output.muted(&format!("({})", leaf.id))
                    ),
                    None => format!("{indent}- {}", leaf.id),
                },
                NavigationNode::Category(category) => match resolve_landing(category) {
                    Some(landing) => format!(
                        "{indent}+ {} {}",
                        category.label,
                        output.muted(&format!("-> {landing}"))
                    ),
                    None => format!("{indent}+ {}", category.label),
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    const CONFIG: &str = r#"
[site]
title = "Portal"
url = "https://example.com"

[[docs]]
id = "ats"
path = "docs/ats"
sidebar_path = "sidebars-ats.yaml"

[[docs]]
id = "mass-payout"
path = "docs/mass-payout"
sidebar_path = "sidebars-mass-payout.yaml"
"#;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn portal() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "sidebars-ats.yaml", "atsSidebar:\n  - intro\n");
        write(dir.path(), "docs/ats/intro.md", "");
        write(
            dir.path(),
            "sidebars-mass-payout.yaml",
            "mpSidebar:\n  - overview\n  - setup\n",
        );
        write(dir.path(), "docs/mass-payout/overview.md", "");
        write(dir.path(), "docs/mass-payout/setup.md", "");

        let config = Config::from_toml_str(CONFIG, dir.path()).unwrap();
        (dir, config)
    }

    #[test]
    fn test_sidebar_found_in_later_instance() {
        let (_dir, config) = portal();

        let lines = tree_lines(&config, Some("mpSidebar"), &Output::new()).unwrap();

        assert_eq!(
            lines,
            vec!["mass-payout/mpSidebar", "  - overview", "  - setup"]
        );
    }

    #[test]
    fn test_all_sidebars_of_all_instances() {
        let (_dir, config) = portal();

        let lines = tree_lines(&config, None, &Output::new()).unwrap();

        assert_eq!(
            lines,
            vec![
                "ats/atsSidebar",
                "  - intro",
                "mass-payout/mpSidebar",
                "  - overview",
                "  - setup",
            ]
        );
    }

    #[test]
    fn test_unknown_sidebar() {
        let (_dir, config) = portal();

        let err = tree_lines(&config, Some("nope"), &Output::new()).unwrap_err();

        assert!(matches!(err, CliError::NotFound(_)));
        assert_eq!(
            err.to_string(),
            "Sidebar 'nope' not found in any docs instance"
        );
    }
}
