//! Navigation tree resolver for Folio.
//!
//! This crate turns declaratively authored sidebars into validated,
//! render-ready navigation:
//!
//! - [`SidebarRegistry`] / [`Sidebar`] / [`NavigationNode`]: the tree model
//! - [`validate`]: duplicate and missing document checks, empty category warnings
//! - [`flatten`]: lazy depth-first pre-order traversal
//! - [`resolve_landing`]: page to open when a category is activated
//! - [`compute_adjacency`]: previous/next links between pages
//! - [`load`]: YAML/JSON sidebar declarations
//! - [`Manifest`]: JSON handed to the rendering engine
//!
//! The resolver is pure: document existence is answered by a
//! [`ContentIndex`] supplied by the caller.
//!
//! # Quick Start
//!
//! ```
//! use std::collections::HashSet;
//! use folio_nav::{Category, DocumentId, NavigationNode, Sidebar, SidebarRegistry};
//!
//! let sidebar = Sidebar::new(
//!     "docs",
//!     vec![
//!         NavigationNode::leaf("intro"),
//!         Category::new("Guides")
//!             .with_children([NavigationNode::leaf("a"), NavigationNode::leaf("b")])
//!             .into(),
//!     ],
//! );
//! let registry = SidebarRegistry::new().with_sidebar(sidebar)?;
//! let index: HashSet<DocumentId> = ["intro", "a", "b"].into_iter().map(DocumentId::from).collect();
//!
//! let report = folio_nav::validate(&registry, &index)?;
//! assert!(report.is_clean());
//!
//! let adjacency = registry.get("docs").unwrap().adjacency();
//! assert_eq!(adjacency.next("intro").map(DocumentId::as_str), Some("a"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod adjacency;
mod content;
mod flatten;
mod landing;
pub mod load;
mod manifest;
mod node;
mod sidebar;
mod validate;

pub use adjacency::{AdjacencyMap, PageLinks, compute_adjacency};
pub use content::ContentIndex;
pub use flatten::{FlatEntry, Flatten, flatten, leaves};
pub use landing::resolve_landing;
pub use load::LoadError;
pub use manifest::{DocumentLinks, Manifest, ManifestItem, SidebarManifest};
pub use node::{Category, DocumentId, Leaf, NavigationNode, NodePath};
pub use sidebar::{RegistryError, Sidebar, SidebarRegistry};
pub use validate::{
    BrokenLinkPolicy, ValidationError, ValidationReport, ValidationWarning, Validator, validate,
    validate_par,
};
