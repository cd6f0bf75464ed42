//! Previous/next page links.
//!
//! Adjacency follows the pre-order leaf sequence of a sidebar. Category
//! landing documents are not stops of their own.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

use crate::flatten::leaves;
use crate::node::DocumentId;
use crate::sidebar::Sidebar;

/// Neighbours of one page in reading order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    /// The page.
    pub id: DocumentId,
    /// Page before this one, `None` for the first page.
    pub previous: Option<DocumentId>,
    /// Page after this one, `None` for the last page.
    pub next: Option<DocumentId>,
}

/// Previous/next links for every leaf of a sidebar.
///
/// Iterates in sidebar order. Lookups by id return the first occurrence if a
/// (not yet validated) sidebar lists a document twice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdjacencyMap {
    links: Vec<PageLinks>,
    index: HashMap<DocumentId, usize>,
}

impl AdjacencyMap {
    /// Links for a page.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PageLinks> {
        self.index.get(id).map(|&i| &self.links[i])
    }

    /// Page before `id`.
    #[must_use]
    pub fn previous(&self, id: &str) -> Option<&DocumentId> {
        self.get(id)?.previous.as_ref()
    }

    /// Page after `id`.
    #[must_use]
    pub fn next(&self, id: &str) -> Option<&DocumentId> {
        self.get(id)?.next.as_ref()
    }

    /// All links in sidebar order.
    pub fn iter(&self) -> std::slice::Iter<'_, PageLinks> {
        self.links.iter()
    }

    /// Number of stops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// True if the sidebar has no leaves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl<'a> IntoIterator for &'a AdjacencyMap {
    type Item = &'a PageLinks;
    type IntoIter = std::slice::Iter<'a, PageLinks>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for AdjacencyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.links.serialize(serializer)
    }
}

/// Compute previous/next links for a sidebar.
#[must_use]
pub fn compute_adjacency(sidebar: &Sidebar) -> AdjacencyMap {
    let order: Vec<&DocumentId> = leaves(sidebar.items()).map(|leaf| &leaf.id).collect();

    let mut links = Vec::with_capacity(order.len());
    let mut index = HashMap::with_capacity(order.len());

    for (i, &id) in order.iter().enumerate() {
        index.entry(id.clone()).or_insert(i);
        links.push(PageLinks {
            id: id.clone(),
            previous: i.checked_sub(1).map(|p| order[p].clone()),
            next: order.get(i + 1).map(|&n| n.clone()),
        });
    }

    AdjacencyMap { links, index }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::node::{Category, NavigationNode};

    fn flat_sidebar(ids: &[&str]) -> Sidebar {
        Sidebar::new("docs", ids.iter().map(|&id| NavigationNode::leaf(id)).collect())
    }

    #[test]
    fn test_flat_sidebar_chain() {
        let sidebar = flat_sidebar(&["d1", "d2", "d3", "d4"]);

        let adjacency = compute_adjacency(&sidebar);

        assert_eq!(adjacency.len(), 4);
        assert!(adjacency.previous("d1").is_none());
        assert!(adjacency.next("d4").is_none());
        assert_eq!(adjacency.next("d1").map(DocumentId::as_str), Some("d2"));
        assert_eq!(adjacency.next("d2").map(DocumentId::as_str), Some("d3"));
        assert_eq!(adjacency.next("d3").map(DocumentId::as_str), Some("d4"));
        assert_eq!(adjacency.previous("d4").map(DocumentId::as_str), Some("d3"));
    }

    #[test]
    fn test_single_leaf_has_no_neighbours() {
        let adjacency = compute_adjacency(&flat_sidebar(&["only"]));

        let links = adjacency.get("only").unwrap();
        assert!(links.previous.is_none());
        assert!(links.next.is_none());
    }

    #[test]
    fn test_categories_and_landings_are_not_stops() {
        let sidebar = Sidebar::new(
            "docs",
            vec![
                NavigationNode::leaf("intro"),
                Category::new("Guides")
                    .with_landing("guides/index")
                    .with_children([NavigationNode::leaf("a"), NavigationNode::leaf("b")])
                    .into(),
            ],
        );

        let adjacency = compute_adjacency(&sidebar);

        let order: Vec<&str> = adjacency.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(order, vec!["intro", "a", "b"]);
        assert!(adjacency.get("guides/index").is_none());
        assert!(adjacency.get("Guides").is_none());
        assert_eq!(adjacency.next("intro").map(DocumentId::as_str), Some("a"));
    }

    #[test]
    fn test_unknown_page_has_no_links() {
        let adjacency = compute_adjacency(&flat_sidebar(&["a"]));
        assert!(adjacency.get("missing").is_none());
        assert!(adjacency.next("missing").is_none());
    }

    #[test]
    fn test_empty_sidebar() {
        assert!(compute_adjacency(&flat_sidebar(&[])).is_empty());
    }

    #[test]
    fn test_serializes_in_sidebar_order() {
        let adjacency = compute_adjacency(&flat_sidebar(&["a", "b"]));

        let json = serde_json::to_value(&adjacency).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                { "id": "a", "previous": null, "next": "b" },
                { "id": "b", "previous": "a", "next": null },
            ])
        );
    }
}
