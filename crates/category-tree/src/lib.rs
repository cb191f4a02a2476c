//! Category Tree Engine
//!
//! Structural core of the category admin tree:
//! - node: the category model and the minimal `TreeNode` capability
//! - query: recursive lookups over the nested forest
//! - index: flat arena built once per tree snapshot
//! - reorder: drop resolution (reorder within a group vs move to a new parent)
//! - controller: drag state machine and async commit
//!
//! Persistence is never done here; callers supply a `TreeMutations` implementation
//! and are responsible for refreshing the tree after every commit.

mod error;
mod node;
mod query;
mod index;
mod reorder;
mod controller;

pub use error::{MutationError, TreeError, TreeResult};
pub use node::{Category, CategoryId, TreeNode};
pub use query::{collect_siblings, find_by_id, visible_rows};
pub use index::TreeIndex;
pub use reorder::{array_move, resolve_drop, resolve_new_parent, DropIntent};
pub use controller::{DragController, DragOutcome, DragPhase, Sleeper, TreeMutations};
