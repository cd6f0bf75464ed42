//! Sidebar declaration files.
//!
//! A declaration file maps sidebar ids to item lists. Items are either a bare
//! document id or a typed object:
//!
//! ```yaml
//! atsSidebar:
//!   - intro
//!   - type: doc
//!     id: getting-started/quick-start
//!     label: Quick start
//!   - type: category
//!     label: Getting Started
//!     collapsed: true
//!     link: { type: doc, id: getting-started/index }
//!     items:
//!       - getting-started/full-setup
//! ```
//!
//! JSON files use the same shape. Files ending in `.json` are parsed as JSON,
//! everything else as YAML.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::node::{Category, DocumentId, Leaf, NavigationNode};
use crate::sidebar::{RegistryError, Sidebar, SidebarRegistry};

/// Error returned when loading sidebar declarations.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Declaration file could not be read.
    #[error("Failed to read sidebar file {}: {source}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// YAML syntax or shape error.
    #[error("Invalid sidebar YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// JSON syntax or shape error.
    #[error("Invalid sidebar JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Declaration is well-formed but semantically invalid.
    #[error("Invalid sidebar '{sidebar}': {message}")]
    Invalid {
        /// Sidebar id.
        sidebar: String,
        /// What is wrong.
        message: String,
    },
    /// Registry rejected a sidebar.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemDecl {
    Doc(String),
    Typed(TypedItemDecl),
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
enum TypedItemDecl {
    Doc {
        id: String,
        #[serde(default)]
        label: Option<String>,
    },
    Category {
        label: String,
        #[serde(default)]
        link: Option<LinkDecl>,
        #[serde(default = "default_true")]
        collapsed: bool,
        #[serde(default = "default_true")]
        collapsible: bool,
        #[serde(default)]
        items: Vec<ItemDecl>,
    },
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
enum LinkDecl {
    Doc { id: String },
}

fn default_true() -> bool {
    true
}

type Declarations = BTreeMap<String, Vec<ItemDecl>>;

/// Parse sidebar declarations from YAML.
///
/// # Errors
///
/// Returns [`LoadError::Yaml`] for malformed input and
/// [`LoadError::Invalid`] for empty ids or labels.
pub fn from_yaml_str(content: &str) -> Result<SidebarRegistry, LoadError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(SidebarRegistry::new());
    }
    let decls: Declarations = serde_yaml::from_str(trimmed)?;
    build_registry(decls)
}

/// Parse sidebar declarations from JSON.
///
/// # Errors
///
/// Returns [`LoadError::Json`] for malformed input and
/// [`LoadError::Invalid`] for empty ids or labels.
pub fn from_json_str(content: &str) -> Result<SidebarRegistry, LoadError> {
    let decls: Declarations = serde_json::from_str(content)?;
    build_registry(decls)
}

/// Read and parse a declaration file, choosing the format by extension.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, otherwise see
/// [`from_yaml_str`] and [`from_json_str`].
pub fn load_file(path: &Path) -> Result<SidebarRegistry, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let registry = if path.extension().is_some_and(|ext| ext == "json") {
        from_json_str(&content)?
    } else {
        from_yaml_str(&content)?
    };

    tracing::debug!(
        path = %path.display(),
        sidebars = registry.len(),
        "Loaded sidebar declarations"
    );
    Ok(registry)
}

fn build_registry(decls: Declarations) -> Result<SidebarRegistry, LoadError> {
    let mut registry = SidebarRegistry::new();
    for (id, items) in decls {
        let items = convert_items(&id, items)?;
        registry.insert(Sidebar::new(id, items))?;
    }
    Ok(registry)
}

fn convert_items(sidebar: &str, items: Vec<ItemDecl>) -> Result<Vec<NavigationNode>, LoadError> {
    items
        .into_iter()
        .map(|item| convert_item(sidebar, item))
        .collect()
}

fn convert_item(sidebar: &str, item: ItemDecl) -> Result<NavigationNode, LoadError> {
    let invalid = |message: &str| LoadError::Invalid {
        sidebar: sidebar.to_owned(),
        message: message.to_owned(),
    };

    match item {
        ItemDecl::Doc(id) | ItemDecl::Typed(TypedItemDecl::Doc { id, label: None }) => {
            if id.is_empty() {
                return Err(invalid("document id cannot be empty"));
            }
            Ok(NavigationNode::leaf(id))
        }
        ItemDecl::Typed(TypedItemDecl::Doc {
            id,
            label: Some(label),
        }) => {
            if id.is_empty() {
                return Err(invalid("document id cannot be empty"));
            }
            Ok(NavigationNode::Leaf(Leaf {
                id: DocumentId::new(id),
                label: Some(label),
            }))
        }
        ItemDecl::Typed(TypedItemDecl::Category {
            label,
            link,
            collapsed,
            collapsible,
            items,
        }) => {
            if label.is_empty() {
                return Err(invalid("category label cannot be empty"));
            }
            let landing = match link {
                Some(LinkDecl::Doc { id }) if id.is_empty() => {
                    return Err(invalid(&format!(
                        "category '{label}' has an empty link id"
                    )));
                }
                Some(LinkDecl::Doc { id }) => Some(DocumentId::new(id)),
                None => None,
            };
            Ok(NavigationNode::Category(Category {
                label,
                landing,
                collapsed,
                collapsible,
                children: convert_items(sidebar, items)?,
            }))
        }
    }
}
