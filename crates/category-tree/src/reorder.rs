//! Drop Resolution
//!
//! Turns an (active, over) pair into exactly one intent:
//! reorder within the active node's sibling group, or move to a new parent.

use std::hash::Hash;

use crate::error::{TreeError, TreeResult};
use crate::index::TreeIndex;

/// What a finished drag asks the repository to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropIntent<Id> {
    /// Full ordered id list of one sibling group
    Reorder { ordered_ids: Vec<Id> },
    /// Re-parent a node; `new_order` is left to the repository
    Move {
        id: Id,
        new_parent_id: Option<Id>,
        new_order: Option<u32>,
    },
}

/// Stable move: remove at `from`, reinsert at `to`; other elements keep their relative order
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() {
        return;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
}

/// New parent for a cross-group move
///
/// When both nodes share a parent the dragged node nests under the over node.
/// `resolve_drop` only gets here when the parents differ, so that branch is
/// currently unreachable from a drag; it stays until product decides what
/// dropping onto a sibling should mean.
pub fn resolve_new_parent<Id: PartialEq + Clone>(
    active_parent: Option<&Id>,
    over_id: &Id,
    over_parent: Option<&Id>,
) -> Option<Id> {
    if over_parent == active_parent {
        Some(over_id.clone())
    } else {
        over_parent.cloned()
    }
}

/// Resolve a drop of `active` onto `over` against the current snapshot
///
/// `Ok(None)` for a self-drop, `Err(NotFound)` when the snapshot no longer
/// holds one of the ids.
pub fn resolve_drop<Id>(index: &TreeIndex<Id>, active: &Id, over: &Id) -> TreeResult<Option<DropIntent<Id>>>
where
    Id: Clone + Eq + Hash + std::fmt::Debug,
{
    if active == over {
        return Ok(None);
    }

    let active_parent = index
        .parent_of(active)
        .ok_or_else(|| TreeError::NotFound(format!("{:?}", active)))?;
    let over_parent = index
        .parent_of(over)
        .ok_or_else(|| TreeError::NotFound(format!("{:?}", over)))?;

    if active_parent == over_parent {
        let mut ordered_ids = index.siblings(active_parent).to_vec();
        if let (Some(old_index), Some(new_index)) = (index.position(active), index.position(over)) {
            array_move(&mut ordered_ids, old_index, new_index);
        }
        return Ok(Some(DropIntent::Reorder { ordered_ids }));
    }

    Ok(Some(DropIntent::Move {
        id: active.clone(),
        new_parent_id: resolve_new_parent(active_parent, over, over_parent),
        new_order: None,
    }))
}
