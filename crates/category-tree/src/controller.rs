//! Drag Controller
//!
//! State machine behind the tree's drag handles:
//!
//! ```text
//! Idle --drag_start--> Dragging(active) --drag_end--> Committing --> Idle
//!                           |                                         ^
//!                           +--- no target / stale / self-drop -------+
//! ```
//!
//! Only one commit may be outstanding. While it is, new drags are refused
//! and further drag-ends are reported as `Busy` without calling the repository.

use std::cell::RefCell;
use std::fmt;
use std::hash::Hash;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::{self, Either, LocalBoxFuture};

use crate::error::{MutationError, TreeError};
use crate::index::TreeIndex;
use crate::reorder::{resolve_drop, DropIntent};

/// Persistence callbacks supplied by the caller
///
/// The caller owns the tree; after any commit it is expected to re-fetch it.
#[async_trait(?Send)]
pub trait TreeMutations<Id> {
    /// Persist the full ordered id list of one sibling group
    async fn reorder(&self, ordered_ids: Vec<Id>) -> Result<(), MutationError>;

    /// Re-parent `id` under `new_parent_id` (`None` = root)
    async fn move_node(&self, id: Id, new_parent_id: Option<Id>, new_order: Option<u32>) -> Result<(), MutationError>;

    /// A commit was given up on before the repository answered
    ///
    /// The request may still land server-side, so implementations that
    /// settle inside `reorder` / `move_node` must report and re-fetch here.
    fn abandoned(&self, _intent: &DropIntent<Id>, _error: &TreeError) {}
}

/// Produces the timer future a commit races against
pub type Sleeper = Box<dyn Fn(Duration) -> LocalBoxFuture<'static, ()>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragPhase<Id> {
    Idle,
    Dragging { active: Id },
    Committing,
}

/// How a drag-end was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome<Id> {
    /// No drag was in progress
    Ignored,
    /// A commit is still outstanding; nothing was sent
    Busy,
    /// Released without a drop target
    Cancelled,
    /// Dropped onto itself
    NoOp,
    /// Snapshot no longer holds the active or over node
    Stale,
    Committed(DropIntent<Id>),
    /// Repository rejected or timed out; already logged
    Failed(TreeError),
}

struct CommitTimeout {
    duration: Duration,
    sleeper: Sleeper,
}

/// Drag state for one tree instance
pub struct DragController<Id> {
    phase: RefCell<DragPhase<Id>>,
    timeout: Option<CommitTimeout>,
    listener: RefCell<Option<Box<dyn Fn(&DragPhase<Id>)>>>,
}

impl<Id> Default for DragController<Id>
where
    Id: Clone + Eq + Hash + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Id> DragController<Id>
where
    Id: Clone + Eq + Hash + fmt::Debug,
{
    pub fn new() -> Self {
        Self {
            phase: RefCell::new(DragPhase::Idle),
            timeout: None,
            listener: RefCell::new(None),
        }
    }

    /// Give up on a commit after `duration`; `sleeper` supplies the timer
    pub fn with_timeout(mut self, duration: Duration, sleeper: Sleeper) -> Self {
        self.timeout = Some(CommitTimeout { duration, sleeper });
        self
    }

    /// Called after every phase change
    pub fn set_phase_listener(&self, listener: impl Fn(&DragPhase<Id>) + 'static) {
        *self.listener.borrow_mut() = Some(Box::new(listener));
    }

    pub fn phase(&self) -> DragPhase<Id> {
        self.phase.borrow().clone()
    }

    pub fn active_id(&self) -> Option<Id> {
        match &*self.phase.borrow() {
            DragPhase::Dragging { active } => Some(active.clone()),
            _ => None,
        }
    }

    pub fn is_committing(&self) -> bool {
        matches!(*self.phase.borrow(), DragPhase::Committing)
    }

    fn set_phase(&self, phase: DragPhase<Id>) {
        *self.phase.borrow_mut() = phase;
        if let Some(listener) = &*self.listener.borrow() {
            listener(&self.phase.borrow());
        }
    }

    /// Begin dragging `active`. Refused while a commit is outstanding.
    pub fn drag_start(&self, active: Id) -> bool {
        if self.is_committing() {
            log::debug!("drag of {:?} ignored: commit in progress", active);
            return false;
        }
        self.set_phase(DragPhase::Dragging { active });
        true
    }

    /// Finish the drag over `over` and commit the resolved intent
    ///
    /// Exactly one of `reorder` / `move_node` is called, and only when the
    /// drop resolves to a change. The phase is back to `Idle` when this returns,
    /// or when the returned future is dropped mid-commit.
    pub async fn drag_end<M>(&self, index: &TreeIndex<Id>, over: Option<Id>, mutations: &M) -> DragOutcome<Id>
    where
        M: TreeMutations<Id> + ?Sized,
    {
        let active = match self.phase() {
            DragPhase::Committing => return DragOutcome::Busy,
            DragPhase::Idle => return DragOutcome::Ignored,
            DragPhase::Dragging { active } => active,
        };

        let Some(over) = over else {
            self.set_phase(DragPhase::Idle);
            return DragOutcome::Cancelled;
        };

        let intent = match resolve_drop(index, &active, &over) {
            Ok(Some(intent)) => intent,
            Ok(None) => {
                self.set_phase(DragPhase::Idle);
                return DragOutcome::NoOp;
            }
            Err(e) => {
                log::debug!("drop ignored, snapshot is stale: {}", e);
                self.set_phase(DragPhase::Idle);
                return DragOutcome::Stale;
            }
        };

        self.set_phase(DragPhase::Committing);
        let _idle_on_exit = IdleOnDrop(self);

        match self.commit(&intent, mutations).await {
            Ok(()) => {
                log::info!("category tree commit done: {:?}", intent);
                DragOutcome::Committed(intent)
            }
            Err(e) => {
                log::error!("category tree commit failed: {}", e);
                DragOutcome::Failed(e)
            }
        }
    }

    async fn commit<M>(&self, intent: &DropIntent<Id>, mutations: &M) -> Result<(), TreeError>
    where
        M: TreeMutations<Id> + ?Sized,
    {
        let call = Box::pin(async {
            match intent.clone() {
                DropIntent::Reorder { ordered_ids } => mutations.reorder(ordered_ids).await,
                DropIntent::Move { id, new_parent_id, new_order } => {
                    mutations.move_node(id, new_parent_id, new_order).await
                }
            }
        });

        match &self.timeout {
            None => Ok(call.await?),
            Some(timeout) => match future::select(call, (timeout.sleeper)(timeout.duration)).await {
                Either::Left((result, _)) => Ok(result?),
                Either::Right(((), pending)) => {
                    drop(pending);
                    let error = TreeError::TimedOut(timeout.duration);
                    mutations.abandoned(intent, &error);
                    Err(error)
                }
            },
        }
    }
}

/// Returns the controller to `Idle` however the commit ends
struct IdleOnDrop<'a, Id>(&'a DragController<Id>)
where
    Id: Clone + Eq + Hash + fmt::Debug;

impl<Id> Drop for IdleOnDrop<'_, Id>
where
    Id: Clone + Eq + Hash + fmt::Debug,
{
    fn drop(&mut self) {
        self.0.set_phase(DragPhase::Idle);
    }
}

#[cfg(test)]
mod tests;
