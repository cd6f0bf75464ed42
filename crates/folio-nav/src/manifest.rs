//! Render-ready navigation manifest.
//!
//! The manifest is what the static-site engine consumes: a nested item tree
//! per sidebar with resolved labels, landing pages and permalinks, plus the
//! previous/next chain. Labels and permalinks come from a [`DocumentLinks`]
//! implementation supplied by the caller, which keeps this crate free of
//! configuration and filesystem concerns.

use serde::Serialize;

use crate::adjacency::{AdjacencyMap, compute_adjacency};
use crate::landing::resolve_landing;
use crate::node::{Category, DocumentId, Leaf, NavigationNode};
use crate::sidebar::{Sidebar, SidebarRegistry};

/// Per-document presentation data.
pub trait DocumentLinks {
    /// Public URL of a document.
    fn permalink(&self, _id: &DocumentId) -> Option<String> {
        None
    }

    /// Default label of a document (e.g. from its front matter).
    fn title(&self, _id: &DocumentId) -> Option<String> {
        None
    }
}

impl DocumentLinks for () {}

/// One item of a rendered sidebar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ManifestItem {
    /// Link to a page.
    Doc {
        /// Document id.
        id: DocumentId,
        /// Display label.
        label: String,
        /// Public URL.
        #[serde(skip_serializing_if = "Option::is_none")]
        permalink: Option<String>,
    },
    /// Group of items.
    Category {
        /// Display label.
        label: String,
        /// Initial collapsed state.
        collapsed: bool,
        /// Whether the category can be collapsed.
        collapsible: bool,
        /// Resolved landing document.
        #[serde(skip_serializing_if = "Option::is_none")]
        landing: Option<DocumentId>,
        /// Public URL of the landing document.
        #[serde(skip_serializing_if = "Option::is_none")]
        permalink: Option<String>,
        /// Child items.
        items: Vec<ManifestItem>,
    },
}

/// Rendered sidebar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarManifest {
    /// Sidebar id.
    pub id: String,
    /// Item tree.
    pub items: Vec<ManifestItem>,
    /// Previous/next links in reading order.
    pub adjacency: AdjacencyMap,
}

impl SidebarManifest {
    /// Render a sidebar.
    #[must_use]
    pub fn build(sidebar: &Sidebar, links: &dyn DocumentLinks) -> Self {
        Self {
            id: sidebar.id().to_owned(),
            items: build_items(sidebar.items(), links),
            adjacency: compute_adjacency(sidebar),
        }
    }
}

/// Rendered registry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Manifest {
    /// Sidebars ordered by id.
    pub sidebars: Vec<SidebarManifest>,
}

impl Manifest {
    /// Render every sidebar of a registry.
    #[must_use]
    pub fn build(registry: &SidebarRegistry, links: &dyn DocumentLinks) -> Self {
        Self {
            sidebars: registry
                .iter()
                .map(|sidebar| SidebarManifest::build(sidebar, links))
                .collect(),
        }
    }

    /// Sidebar by id.
    #[must_use]
    pub fn sidebar(&self, id: &str) -> Option<&SidebarManifest> {
        self.sidebars.iter().find(|sidebar| sidebar.id == id)
    }
}

fn build_items(nodes: &[NavigationNode], links: &dyn DocumentLinks) -> Vec<ManifestItem> {
    nodes
        .iter()
        .map(|node| match node {
            NavigationNode::Leaf(leaf) => build_doc(leaf, links),
            NavigationNode::Category(category) => build_category(category, links),
        })
        .collect()
}

fn build_doc(leaf: &Leaf, links: &dyn DocumentLinks) -> ManifestItem {
    let label = leaf
        .label
        .clone()
        .or_else(|| links.title(&leaf.id))
        .unwrap_or_else(|| leaf.id.to_string());

    ManifestItem::Doc {
        id: leaf.id.clone(),
        label,
        permalink: links.permalink(&leaf.id),
    }
}

fn build_category(category: &Category, links: &dyn DocumentLinks) -> ManifestItem {
    let landing = resolve_landing(category).cloned();
    let permalink = landing.as_ref().and_then(|id| links.permalink(id));

    ManifestItem::Category {
        label: category.label.clone(),
        collapsed: category.collapsed,
        collapsible: category.collapsible,
        landing,
        permalink,
        items: build_items(&category.children, links),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    struct TestLinks;

    impl DocumentLinks for TestLinks {
        fn permalink(&self, id: &DocumentId) -> Option<String> {
            Some(format!("/docs/{id}/"))
        }

        fn title(&self, id: &DocumentId) -> Option<String> {
            (id.as_str() == "intro").then(|| "Introduction".to_owned())
        }
    }

    fn sidebar() -> Sidebar {
        Sidebar::new(
            "docs",
            vec![
                NavigationNode::leaf("intro"),
                Category::new("Guides")
                    .collapsed(false)
                    .with_children([NavigationNode::labeled_leaf("a", "Alpha")])
                    .into(),
                Category::new("Later").into(),
            ],
        )
    }

    #[test]
    fn test_sidebar_manifest_json() {
        let manifest = SidebarManifest::build(&sidebar(), &TestLinks);

        assert_eq!(
            serde_json::to_value(&manifest).unwrap(),
            json!({
                "id": "docs",
                "items": [
                    { "type": "doc", "id": "intro", "label": "Introduction", "permalink": "/docs/intro/" },
                    {
                        "type": "category",
                        "label": "Guides",
                        "collapsed": false,
                        "collapsible": true,
                        "landing": "a",
                        "permalink": "/docs/a/",
                        "items": [
                            { "type": "doc", "id": "a", "label": "Alpha", "permalink": "/docs/a/" }
                        ]
                    },
                    {
                        "type": "category",
                        "label": "Later",
                        "collapsed": true,
                        "collapsible": true,
                        "items": []
                    }
                ],
                "adjacency": [
                    { "id": "intro", "previous": null, "next": "a" },
                    { "id": "a", "previous": "intro", "next": null }
                ]
            })
        );
    }

    #[test]
    fn test_label_falls_back_to_id_without_links() {
        let manifest = SidebarManifest::build(&sidebar(), &());

        assert_eq!(
            manifest.items[0],
            ManifestItem::Doc {
                id: DocumentId::from("intro"),
                label: "intro".to_owned(),
                permalink: None,
            }
        );
    }

    #[test]
    fn test_registry_manifest_keeps_sidebar_order() {
        let registry = SidebarRegistry::try_from(vec![
            Sidebar::new("b", Vec::new()),
            Sidebar::new("a", Vec::new()),
        ])
        .unwrap();

        let manifest = Manifest::build(&registry, &());

        let ids: Vec<&str> = manifest.sidebars.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(manifest.sidebar("a").is_some());
        assert!(manifest.sidebar("c").is_none());
    }
}
