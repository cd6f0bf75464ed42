//! Depth-first pre-order traversal of sidebar trees.
//!
//! [`Flatten`] walks a node forest lazily with an explicit stack, so nesting
//! depth is bounded by memory rather than by the call stack. A category is
//! yielded before its children and siblings are yielded in declared order.

use std::iter::FusedIterator;
use std::slice;

use crate::node::{Leaf, NavigationNode, NodePath};
use crate::sidebar::Sidebar;

/// One node of a flattened sidebar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatEntry<'a> {
    /// Path from sidebar root to this node (inclusive).
    pub path: NodePath,
    /// The node itself.
    pub node: &'a NavigationNode,
    /// Nesting depth. Top-level nodes have depth 0.
    pub depth: usize,
}

impl FlatEntry<'_> {
    /// Document id for leaves, label for categories.
    #[must_use]
    pub fn label(&self) -> &str {
        self.node.segment()
    }
}

/// Pending siblings at one nesting level.
struct Frame<'a> {
    nodes: slice::Iter<'a, NavigationNode>,
    parent: NodePath,
}

/// Lazy pre-order iterator over a node forest.
pub struct Flatten<'a> {
    stack: Vec<Frame<'a>>,
}

impl<'a> Flatten<'a> {
    /// Traverse the given top-level nodes.
    #[must_use]
    pub fn new(nodes: &'a [NavigationNode]) -> Self {
        Self {
            stack: vec![Frame {
                nodes: nodes.iter(),
                parent: NodePath::root(),
            }],
        }
    }
}

impl<'a> Iterator for Flatten<'a> {
    type Item = FlatEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.stack.len().checked_sub(1)?;
            let frame = self.stack.last_mut()?;
            let Some(node) = frame.nodes.next() else {
                self.stack.pop();
                continue;
            };
            let path = frame.parent.child(node.segment());

            if let NavigationNode::Category(category) = node
                && !category.children.is_empty()
            {
                self.stack.push(Frame {
                    nodes: category.children.iter(),
                    parent: path.clone(),
                });
            }

            return Some(FlatEntry { path, node, depth });
        }
    }
}

impl FusedIterator for Flatten<'_> {}

/// Flatten a sidebar into a pre-order sequence of entries.
#[must_use]
pub fn flatten(sidebar: &Sidebar) -> Flatten<'_> {
    Flatten::new(sidebar.items())
}

/// Leaves of a node forest in pre-order.
///
/// Cheaper than [`Flatten`] when paths are not needed.
pub fn leaves(nodes: &[NavigationNode]) -> impl Iterator<Item = &Leaf> {
    let mut stack = vec![nodes.iter()];
    std::iter::from_fn(move || {
        loop {
            let node = match stack.last_mut()?.next() {
                Some(node) => node,
                None => {
                    stack.pop();
                    continue;
                }
            };
            match node {
                NavigationNode::Leaf(leaf) => return Some(leaf),
                NavigationNode::Category(category) => stack.push(category.children.iter()),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::node::Category;

    fn labels_with_depth(nodes: &[NavigationNode]) -> Vec<(String, usize)> {
        Flatten::new(nodes)
            .map(|entry| (entry.label().to_owned(), entry.depth))
            .collect()
    }

    #[test]
    fn test_flatten_empty() {
        assert!(Flatten::new(&[]).next().is_none());
    }

    #[test]
    fn test_flatten_category_before_children() {
        let nodes = vec![
            NavigationNode::leaf("intro"),
            Category::new("Guides")
                .with_children([NavigationNode::leaf("a"), NavigationNode::leaf("b")])
                .into(),
        ];

        assert_eq!(
            labels_with_depth(&nodes),
            vec![
                ("intro".to_owned(), 0),
                ("Guides".to_owned(), 0),
                ("a".to_owned(), 1),
                ("b".to_owned(), 1),
            ]
        );
    }

    #[test]
    fn test_flatten_returns_to_outer_level_after_nested_category() {
        let nodes = vec![
            Category::new("Outer")
                .with_children([
                    Category::new("Inner")
                        .with_children([NavigationNode::leaf("deep")])
                        .into(),
                    NavigationNode::leaf("after-inner"),
                ])
                .into(),
            NavigationNode::leaf("last"),
        ];

        assert_eq!(
            labels_with_depth(&nodes),
            vec![
                ("Outer".to_owned(), 0),
                ("Inner".to_owned(), 1),
                ("deep".to_owned(), 2),
                ("after-inner".to_owned(), 1),
                ("last".to_owned(), 0),
            ]
        );
    }

    #[test]
    fn test_flatten_builds_paths() {
        let nodes = vec![
            Category::new("Guides")
                .with_children([NavigationNode::leaf("guides/setup")])
                .into(),
        ];

        let paths: Vec<String> = Flatten::new(&nodes)
            .map(|entry| entry.path.to_string())
            .collect();

        assert_eq!(paths, vec!["Guides", "Guides > guides/setup"]);
    }

    #[test]
    fn test_flatten_empty_category_is_still_emitted() {
        let nodes = vec![Category::new("Empty").into(), NavigationNode::leaf("a")];

        assert_eq!(
            labels_with_depth(&nodes),
            vec![("Empty".to_owned(), 0), ("a".to_owned(), 0)]
        );
    }

    #[test]
    fn test_flatten_handles_deep_nesting() {
        let mut node = NavigationNode::leaf("bottom");
        for level in 0..1_000 {
            node = Category::new(format!("level-{level}"))
                .with_children([node])
                .into();
        }
        let nodes = vec![node];

        let last = Flatten::new(&nodes).last().unwrap();

        assert_eq!(last.label(), "bottom");
        assert_eq!(last.depth, 1_000);
    }

    #[test]
    fn test_leaves_skips_categories() {
        let nodes = vec![
            Category::new("Empty").into(),
            Category::new("Guides")
                .with_landing("guides/index")
                .with_children([NavigationNode::leaf("a")])
                .into(),
            NavigationNode::leaf("b"),
        ];

        let ids: Vec<&str> = leaves(&nodes).map(|leaf| leaf.id.as_str()).collect();

        assert_eq!(ids, vec!["a", "b"]);
    }
}
