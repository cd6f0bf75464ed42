//! Category landing page resolution.

use crate::flatten::leaves;
use crate::node::{Category, DocumentId};

/// Page to open when a category is activated.
///
/// Returns the explicit landing document if declared, otherwise the first
/// leaf found depth-first among the category's descendants. Landing pages of
/// nested categories are not considered. `None` means the category has no
/// navigable target and renders as a plain label.
#[must_use]
pub fn resolve_landing(category: &Category) -> Option<&DocumentId> {
    category
        .landing
        .as_ref()
        .or_else(|| leaves(&category.children).next().map(|leaf| &leaf.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NavigationNode;

    #[test]
    fn test_explicit_landing_wins() {
        let category = Category::new("Guides")
            .with_landing("guides/index")
            .with_children([NavigationNode::leaf("guides/a")]);

        assert_eq!(
            resolve_landing(&category).map(DocumentId::as_str),
            Some("guides/index")
        );
    }

    #[test]
    fn test_first_leaf_found_through_empty_category() {
        let category = Category::new("Guides").with_children([
            Category::new("Empty").into(),
            NavigationNode::leaf("d1"),
            NavigationNode::leaf("d2"),
        ]);

        assert_eq!(
            resolve_landing(&category).map(DocumentId::as_str),
            Some("d1")
        );
    }

    #[test]
    fn test_first_leaf_found_depth_first() {
        let category = Category::new("SDK").with_children([
            Category::new("Nested")
                .with_children([NavigationNode::leaf("nested/first")])
                .into(),
            NavigationNode::leaf("second"),
        ]);

        assert_eq!(
            resolve_landing(&category).map(DocumentId::as_str),
            Some("nested/first")
        );
    }

    #[test]
    fn test_nested_landing_is_not_a_fallback() {
        let category = Category::new("API").with_children([Category::new("Contracts")
            .with_landing("api/contracts/index")
            .into()]);

        assert!(resolve_landing(&category).is_none());
    }

    #[test]
    fn test_empty_category_has_no_landing() {
        assert!(resolve_landing(&Category::new("Empty")).is_none());
    }
}
