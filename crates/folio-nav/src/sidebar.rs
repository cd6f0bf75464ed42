//! Sidebars and the sidebar registry.

use std::collections::{BTreeMap, BTreeSet};

use crate::adjacency::{AdjacencyMap, compute_adjacency};
use crate::flatten::{Flatten, flatten, leaves};
use crate::node::{DocumentId, NavigationNode};

/// Named navigation tree for one documentation product.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sidebar {
    id: String,
    items: Vec<NavigationNode>,
}

impl Sidebar {
    /// Create a sidebar from its top-level nodes.
    #[must_use]
    pub fn new(id: impl Into<String>, items: Vec<NavigationNode>) -> Self {
        Self {
            id: id.into(),
            items,
        }
    }

    /// Sidebar identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Top-level nodes in declared order.
    #[must_use]
    pub fn items(&self) -> &[NavigationNode] {
        &self.items
    }

    /// Pre-order traversal of all nodes.
    #[must_use]
    pub fn flatten(&self) -> Flatten<'_> {
        flatten(self)
    }

    /// Previous/next links between leaves.
    #[must_use]
    pub fn adjacency(&self) -> AdjacencyMap {
        compute_adjacency(self)
    }

    /// Every document referenced by a leaf or a category landing slot.
    #[must_use]
    pub fn referenced_documents(&self) -> BTreeSet<&DocumentId> {
        self.flatten()
            .filter_map(|entry| match entry.node {
                NavigationNode::Leaf(leaf) => Some(&leaf.id),
                NavigationNode::Category(category) => category.landing.as_ref(),
            })
            .collect()
    }

    /// Number of leaves.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        leaves(&self.items).count()
    }
}

/// Error returned when assembling a [`SidebarRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Two sidebars share an identifier.
    #[error("Duplicate sidebar id: {0}")]
    DuplicateSidebar(String),
    /// Sidebar identifier is empty.
    #[error("Sidebar id cannot be empty")]
    EmptyId,
}

/// Set of sidebars keyed by identifier.
///
/// Iteration is ordered by identifier so that validation and output are
/// deterministic regardless of declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidebarRegistry {
    sidebars: BTreeMap<String, Sidebar>,
}

impl SidebarRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sidebar.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateSidebar`] if the id is taken and
    /// [`RegistryError::EmptyId`] if it is empty.
    pub fn insert(&mut self, sidebar: Sidebar) -> Result<(), RegistryError> {
        if sidebar.id.is_empty() {
            return Err(RegistryError::EmptyId);
        }
        if self.sidebars.contains_key(&sidebar.id) {
            return Err(RegistryError::DuplicateSidebar(sidebar.id));
        }
        self.sidebars.insert(sidebar.id.clone(), sidebar);
        Ok(())
    }

    /// Add a sidebar, builder style.
    ///
    /// # Errors
    ///
    /// See [`insert`](Self::insert).
    pub fn with_sidebar(mut self, sidebar: Sidebar) -> Result<Self, RegistryError> {
        self.insert(sidebar)?;
        Ok(self)
    }

    /// Sidebar by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Sidebar> {
        self.sidebars.get(id)
    }

    /// Sidebars ordered by id.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Sidebar> {
        self.sidebars.values()
    }

    /// Sidebar ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sidebars.keys().map(String::as_str)
    }

    /// Number of sidebars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sidebars.len()
    }

    /// True if there are no sidebars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sidebars.is_empty()
    }

    /// Documents referenced by any sidebar.
    #[must_use]
    pub fn referenced_documents(&self) -> BTreeSet<&DocumentId> {
        self.iter()
            .flat_map(Sidebar::referenced_documents)
            .collect()
    }
}

impl TryFrom<Vec<Sidebar>> for SidebarRegistry {
    type Error = RegistryError;

    fn try_from(sidebars: Vec<Sidebar>) -> Result<Self, Self::Error> {
        let mut registry = Self::new();
        for sidebar in sidebars {
            registry.insert(sidebar)?;
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use static_assertions::assert_impl_all;

    use super::*;
    use crate::node::Category;

    assert_impl_all!(SidebarRegistry: Send, Sync);

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mut registry = SidebarRegistry::new();
        registry.insert(Sidebar::new("docs", Vec::new())).unwrap();

        let err = registry.insert(Sidebar::new("docs", Vec::new())).unwrap_err();

        assert_eq!(err, RegistryError::DuplicateSidebar("docs".to_owned()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_insert_rejects_empty_id() {
        let err = SidebarRegistry::new()
            .with_sidebar(Sidebar::new("", Vec::new()))
            .unwrap_err();
        assert_eq!(err, RegistryError::EmptyId);
    }

    #[test]
    fn test_iteration_is_ordered_by_id() {
        let registry = SidebarRegistry::try_from(vec![
            Sidebar::new("references", Vec::new()),
            Sidebar::new("ats", Vec::new()),
            Sidebar::new("mass-payout", Vec::new()),
        ])
        .unwrap();

        let ids: Vec<&str> = registry.ids().collect();

        assert_eq!(ids, vec!["ats", "mass-payout", "references"]);
    }

    #[test]
    fn test_referenced_documents_include_landings() {
        let sidebar = Sidebar::new(
            "docs",
            vec![
                NavigationNode::leaf("intro"),
                Category::new("Guides")
                    .with_landing("guides/index")
                    .with_children([NavigationNode::leaf("guides/a")])
                    .into(),
            ],
        );

        let ids: Vec<&str> = sidebar
            .referenced_documents()
            .into_iter()
            .map(DocumentId::as_str)
            .collect();

        assert_eq!(ids, vec!["guides/a", "guides/index", "intro"]);
        assert_eq!(sidebar.leaf_count(), 2);
    }
}
