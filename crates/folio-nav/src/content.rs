//! Content index abstraction.
//!
//! The resolver never touches the filesystem. It asks a [`ContentIndex`]
//! whether a document exists; backends decide where pages come from.

use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

use crate::node::DocumentId;

/// Lookup of authored content pages.
pub trait ContentIndex {
    /// True if a page with this id exists.
    fn exists(&self, id: &DocumentId) -> bool;
}

impl<T: ContentIndex + ?Sized> ContentIndex for &T {
    fn exists(&self, id: &DocumentId) -> bool {
        (**self).exists(id)
    }
}

impl<S: BuildHasher> ContentIndex for HashSet<DocumentId, S> {
    fn exists(&self, id: &DocumentId) -> bool {
        self.contains(id)
    }
}

impl ContentIndex for BTreeSet<DocumentId> {
    fn exists(&self, id: &DocumentId) -> bool {
        self.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check<I: ContentIndex + ?Sized>(index: &I, id: &str) -> bool {
        index.exists(&DocumentId::from(id))
    }

    #[test]
    fn test_hash_set_index() {
        let index: HashSet<DocumentId> = ["a", "b"].into_iter().map(DocumentId::from).collect();
        assert!(check(&index, "a"));
        assert!(!check(&index, "c"));
    }

    #[test]
    fn test_btree_set_index_through_reference() {
        let index: BTreeSet<DocumentId> = ["a"].into_iter().map(DocumentId::from).collect();
        let by_ref = &index;
        assert!(check(&by_ref, "a"));
    }

    #[test]
    fn test_trait_object() {
        let index: HashSet<DocumentId> = ["x"].into_iter().map(DocumentId::from).collect();
        let dynamic: &dyn ContentIndex = &index;
        assert!(check(dynamic, "x"));
    }
}
