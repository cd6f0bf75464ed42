//! Loading a docs instance: content scan plus sidebar declarations.

use std::path::Path;

use folio_config::DocsInstance;
use folio_content::{FsContentIndex, ScanOptions};
use folio_nav::{DocumentId, DocumentLinks, Sidebar, SidebarRegistry, load};

use crate::error::CliError;

/// A docs instance with its content and sidebars loaded.
pub(crate) struct Instance<'a> {
    pub docs: &'a DocsInstance,
    pub content: FsContentIndex,
    pub sidebars: SidebarRegistry,
}

impl<'a> Instance<'a> {
    /// Scan the content directory and parse the sidebar file.
    pub(crate) fn load(docs: &'a DocsInstance) -> Result<Self, CliError> {
        let options = ScanOptions::with_exclude(&docs.exclude)?;
        let content = FsContentIndex::scan_with(&docs.path, &options)?;
        let sidebars = load_sidebars(&docs.sidebar_path)?;

        tracing::info!(
            docs = %docs.id,
            pages = content.len(),
            sidebars = sidebars.len(),
            "Loaded docs instance"
        );

        Ok(Self {
            docs,
            content,
            sidebars,
        })
    }

    /// Sidebar by id, or an error listing the available ones.
    pub(crate) fn sidebar(&self, id: &str) -> Result<&Sidebar, CliError> {
        self.sidebars.get(id).ok_or_else(|| {
            let available = self.sidebars.ids().collect::<Vec<_>>().join(", ");
            CliError::NotFound(format!(
                "Sidebar '{id}' not found in docs '{}' (available: {available})",
                self.docs.id
            ))
        })
    }

    /// Permalinks and labels for manifest rendering.
    pub(crate) fn links(&self) -> InstanceLinks<'_> {
        InstanceLinks {
            docs: self.docs,
            content: &self.content,
        }
    }
}

fn load_sidebars(path: &Path) -> Result<SidebarRegistry, CliError> {
    load::load_file(path).map_err(|source| CliError::Sidebars {
        path: path.to_path_buf(),
        source,
    })
}

/// Combines config permalinks with front matter labels.
pub(crate) struct InstanceLinks<'a> {
    docs: &'a DocsInstance,
    content: &'a FsContentIndex,
}

impl DocumentLinks for InstanceLinks<'_> {
    fn permalink(&self, id: &DocumentId) -> Option<String> {
        Some(self.docs.permalink(id))
    }

    fn title(&self, id: &DocumentId) -> Option<String> {
        self.content.title(id)
    }
}

impl InstanceLinks<'_> {
    /// "Edit this page" URL for a document.
    pub(crate) fn edit_link(&self, id: &DocumentId) -> Option<String> {
        let entry = self.content.get(id.as_str())?;
        self.docs.edit_link(&entry.source)
    }
}
