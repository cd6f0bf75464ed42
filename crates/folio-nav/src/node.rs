//! Navigation tree node types.
//!
//! A sidebar is a forest of [`NavigationNode`]s. Every node owns its children,
//! so a tree can never contain itself: cycles are unrepresentable by
//! construction and traversal never needs a visited set.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a content page (e.g. `"getting-started/quick-start"`).
///
/// Opaque to the resolver: ids are compared byte-for-byte and looked up in a
/// [`ContentIndex`](crate::ContentIndex).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Create a document id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for DocumentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Node pointing directly at one content page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leaf {
    /// Referenced document.
    pub id: DocumentId,
    /// Label override. When `None`, the renderer falls back to the page title.
    pub label: Option<String>,
}

/// Node grouping child nodes under a label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    /// Display label.
    pub label: String,
    /// Page shown when the category itself is activated.
    pub landing: Option<DocumentId>,
    /// Whether the category starts collapsed.
    pub collapsed: bool,
    /// Whether the category can be collapsed at all.
    pub collapsible: bool,
    /// Child nodes in declared order.
    pub children: Vec<NavigationNode>,
}

impl Category {
    /// Create a collapsed, collapsible category without landing page or children.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            landing: None,
            collapsed: true,
            collapsible: true,
            children: Vec::new(),
        }
    }

    /// Set the landing document.
    #[must_use]
    pub fn with_landing(mut self, id: impl Into<DocumentId>) -> Self {
        self.landing = Some(id.into());
        self
    }

    /// Set the initial collapsed state.
    #[must_use]
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// Set whether the category can be collapsed.
    #[must_use]
    pub fn collapsible(mut self, collapsible: bool) -> Self {
        self.collapsible = collapsible;
        self
    }

    /// Append children.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = NavigationNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// True if the category has neither children nor a landing page.
    ///
    /// Such a category renders as a bare label without a link.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.landing.is_none()
    }
}

/// Sidebar tree node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationNode {
    /// Link to a single page.
    Leaf(Leaf),
    /// Group of child nodes.
    Category(Category),
}

impl NavigationNode {
    /// Create a leaf without label override.
    #[must_use]
    pub fn leaf(id: impl Into<DocumentId>) -> Self {
        Self::Leaf(Leaf {
            id: id.into(),
            label: None,
        })
    }

    /// Create a leaf with an explicit label.
    #[must_use]
    pub fn labeled_leaf(id: impl Into<DocumentId>, label: impl Into<String>) -> Self {
        Self::Leaf(Leaf {
            id: id.into(),
            label: Some(label.into()),
        })
    }

    /// Path segment contributed by this node: document id for leaves,
    /// label for categories.
    #[must_use]
    pub fn segment(&self) -> &str {
        match self {
            Self::Leaf(leaf) => leaf.id.as_str(),
            Self::Category(category) => &category.label,
        }
    }

    /// Category data, if this node is a category.
    #[must_use]
    pub fn as_category(&self) -> Option<&Category> {
        match self {
            Self::Category(category) => Some(category),
            Self::Leaf(_) => None,
        }
    }
}

impl From<Category> for NavigationNode {
    fn from(category: Category) -> Self {
        Self::Category(category)
    }
}

impl From<Leaf> for NavigationNode {
    fn from(leaf: Leaf) -> Self {
        Self::Leaf(leaf)
    }
}

/// Location of a node, from the sidebar root down to the node itself.
///
/// Displayed as segments joined with `" > "`, e.g. `Guides > Setup > a`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
    segments: Vec<String>,
}

impl NodePath {
    /// Empty path (the sidebar root).
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Path extended by one segment.
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment.to_owned());
        Self { segments }
    }

    /// Path segments, root first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment, `None` for the root.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for NodePath {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("<root>");
        }
        f.write_str(&self.segments.join(" > "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_borrows_as_str() {
        let ids: std::collections::HashSet<DocumentId> =
            [DocumentId::from("intro")].into_iter().collect();
        assert!(ids.contains("intro"));
        assert!(!ids.contains("outro"));
    }

    #[test]
    fn test_document_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&DocumentId::new("api/index")).unwrap();
        assert_eq!(json, "\"api/index\"");
    }

    #[test]
    fn test_category_defaults() {
        let category = Category::new("Guides");
        assert!(category.collapsed);
        assert!(category.collapsible);
        assert!(category.landing.is_none());
        assert!(category.is_empty());
    }

    #[test]
    fn test_category_with_landing_only_is_not_empty() {
        let category = Category::new("API").with_landing("api/index");
        assert!(!category.is_empty());
    }

    #[test]
    fn test_segment_uses_id_for_leaf_and_label_for_category() {
        assert_eq!(NavigationNode::labeled_leaf("a", "Alpha").segment(), "a");
        assert_eq!(NavigationNode::from(Category::new("Guides")).segment(), "Guides");
    }

    #[test]
    fn test_node_path_display() {
        let path = NodePath::root().child("Guides").child("a");
        assert_eq!(path.to_string(), "Guides > a");
        assert_eq!(path.last(), Some("a"));
        assert_eq!(NodePath::root().to_string(), "<root>");
    }

    #[test]
    fn test_node_path_child_does_not_modify_parent() {
        let parent: NodePath = ["Guides"].into_iter().collect();
        let child = parent.child("a");
        assert_eq!(parent.segments(), ["Guides"]);
        assert_eq!(child.segments(), ["Guides", "a"]);
    }
}
