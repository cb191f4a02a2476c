//! Tree Index
//!
//! Flat arena over one tree snapshot: `id -> parent` plus
//! `parent -> ordered ids`. Built once when a snapshot arrives so that
//! drag-end lookups no longer walk the nested forest.

use std::collections::HashMap;
use std::hash::Hash;

use crate::node::TreeNode;

/// Lookup tables for a single forest snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct TreeIndex<Id: Eq + Hash> {
    /// id -> parent id as recorded on the node
    parents: HashMap<Id, Option<Id>>,
    /// parent id -> member ids in depth-first pre-order
    groups: HashMap<Option<Id>, Vec<Id>>,
}

impl<Id: Clone + Eq + Hash + std::fmt::Debug> TreeIndex<Id> {
    pub fn build<N: TreeNode<Id = Id>>(forest: &[N]) -> Self {
        let mut index = Self {
            parents: HashMap::new(),
            groups: HashMap::new(),
        };
        index.insert_all(forest);
        index
    }

    fn insert_all<N: TreeNode<Id = Id>>(&mut self, nodes: &[N]) {
        for node in nodes {
            let id = node.id().clone();
            let parent = node.parent_id().cloned();
            if self.parents.contains_key(&id) {
                log::warn!("duplicate category id {:?} in tree snapshot, keeping first", id);
            } else {
                self.groups.entry(parent.clone()).or_default().push(id.clone());
                self.parents.insert(id, parent);
            }
            self.insert_all(node.children());
        }
    }

    /// Parent of `id`: `None` if unknown, `Some(None)` for roots
    pub fn parent_of(&self, id: &Id) -> Option<Option<&Id>> {
        self.parents.get(id).map(Option::as_ref)
    }

    /// Ordered sibling group for a parent (roots when `parent` is `None`)
    pub fn siblings(&self, parent: Option<&Id>) -> &[Id] {
        self.groups
            .get(&parent.cloned())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Position of `id` within its own sibling group
    pub fn position(&self, id: &Id) -> Option<usize> {
        let parent = self.parent_of(id)?;
        self.siblings(parent).iter().position(|sibling| sibling == id)
    }
}
