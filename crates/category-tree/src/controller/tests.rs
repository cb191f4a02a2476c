//! Drag Protocol Tests
//!
//! Drives `DragController` against a recording `TreeMutations` double.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::FutureExt;
use tokio::sync::oneshot;

use super::*;
use crate::node::{Category, CategoryId};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Reorder(Vec<CategoryId>),
    Move(CategoryId, Option<CategoryId>, Option<u32>),
}

/// Records calls; optionally holds the first one open until a gate fires
#[derive(Default)]
struct RecordingMutations {
    calls: RefCell<Vec<Call>>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
    abandoned: RefCell<Vec<(DropIntent<CategoryId>, TreeError)>>,
    fail_with: Option<MutationError>,
    hang: bool,
}

impl RecordingMutations {
    fn gated(gate: oneshot::Receiver<()>) -> Self {
        Self {
            gate: RefCell::new(Some(gate)),
            ..Default::default()
        }
    }

    fn failing(error: MutationError) -> Self {
        Self {
            fail_with: Some(error),
            ..Default::default()
        }
    }

    fn hanging() -> Self {
        Self {
            hang: true,
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    async fn finish(&self, call: Call) -> Result<(), MutationError> {
        self.calls.borrow_mut().push(call);
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.hang {
            future::pending::<()>().await;
        }
        match &self.fail_with {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl TreeMutations<CategoryId> for RecordingMutations {
    async fn reorder(&self, ordered_ids: Vec<CategoryId>) -> Result<(), MutationError> {
        self.finish(Call::Reorder(ordered_ids)).await
    }

    async fn move_node(
        &self,
        id: CategoryId,
        new_parent_id: Option<CategoryId>,
        new_order: Option<u32>,
    ) -> Result<(), MutationError> {
        self.finish(Call::Move(id, new_parent_id, new_order)).await
    }

    fn abandoned(&self, intent: &DropIntent<CategoryId>, error: &TreeError) {
        self.abandoned.borrow_mut().push((intent.clone(), error.clone()));
    }
}

fn id(s: &str) -> CategoryId {
    CategoryId::from(s)
}

fn ids(list: &[&str]) -> Vec<CategoryId> {
    list.iter().map(|s| id(s)).collect()
}

fn flat_group() -> TreeIndex<CategoryId> {
    let forest: Vec<Category> = ["A", "B", "C", "D"].iter().map(|s| Category::new(*s, *s)).collect();
    TreeIndex::build(&forest)
}

fn nested() -> TreeIndex<CategoryId> {
    TreeIndex::build(&[
        Category::new("1", "Machining").with_children(vec![
            Category::new("1a", "Turning"),
            Category::new("1b", "Milling"),
        ]),
        Category::new("2", "Casting"),
    ])
}

#[tokio::test]
async fn test_same_group_drop_calls_reorder_with_stable_move() {
    let controller = DragController::new();
    let mutations = RecordingMutations::default();

    assert!(controller.drag_start(id("B")));
    let outcome = controller.drag_end(&flat_group(), Some(id("D")), &mutations).await;

    let expected = ids(&["A", "C", "D", "B"]);
    assert_eq!(outcome, DragOutcome::Committed(DropIntent::Reorder { ordered_ids: expected.clone() }));
    assert_eq!(mutations.calls(), vec![Call::Reorder(expected)]);
    assert_eq!(controller.phase(), DragPhase::Idle);
}

#[tokio::test]
async fn test_self_drop_calls_nothing() {
    let controller = DragController::new();
    let mutations = RecordingMutations::default();

    controller.drag_start(id("B"));
    let outcome = controller.drag_end(&flat_group(), Some(id("B")), &mutations).await;

    assert_eq!(outcome, DragOutcome::NoOp);
    assert!(mutations.calls().is_empty());
    assert_eq!(controller.phase(), DragPhase::Idle);
}

#[tokio::test]
async fn test_cross_parent_drop_moves_to_root() {
    let controller = DragController::new();
    let mutations = RecordingMutations::default();

    controller.drag_start(id("1a"));
    controller.drag_end(&nested(), Some(id("2")), &mutations).await;

    assert_eq!(mutations.calls(), vec![Call::Move(id("1a"), None, None)]);
}

#[tokio::test]
async fn test_cross_parent_drop_moves_under_over_parent() {
    let controller = DragController::new();
    let mutations = RecordingMutations::default();

    controller.drag_start(id("2"));
    controller.drag_end(&nested(), Some(id("1a")), &mutations).await;

    assert_eq!(mutations.calls(), vec![Call::Move(id("2"), Some(id("1")), None)]);
}

#[tokio::test]
async fn test_release_without_target_cancels() {
    let controller = DragController::new();
    let mutations = RecordingMutations::default();

    controller.drag_start(id("A"));

    let outcome = controller.drag_end(&flat_group(), None, &mutations).await;
    assert_eq!(outcome, DragOutcome::Cancelled);
    assert_eq!(controller.phase(), DragPhase::Idle);
    assert!(mutations.calls().is_empty());
}

#[tokio::test]
async fn test_stale_ids_are_silently_dropped() {
    let controller = DragController::new();
    let mutations = RecordingMutations::default();

    controller.drag_start(id("removed-meanwhile"));
    let outcome = controller.drag_end(&flat_group(), Some(id("A")), &mutations).await;

    assert_eq!(outcome, DragOutcome::Stale);
    assert!(mutations.calls().is_empty());
    assert_eq!(controller.phase(), DragPhase::Idle);
}

#[tokio::test]
async fn test_drag_end_without_drag_is_ignored() {
    let controller = DragController::<CategoryId>::new();
    let mutations = RecordingMutations::default();

    let outcome = controller.drag_end(&flat_group(), Some(id("A")), &mutations).await;
    assert_eq!(outcome, DragOutcome::Ignored);
}

#[tokio::test]
async fn test_pending_commit_blocks_second_commit() {
    let controller = DragController::new();
    let (release, gate) = oneshot::channel();
    let mutations = RecordingMutations::gated(gate);
    let index = flat_group();

    let (controller, mutations, index) = (&controller, &mutations, &index);
    let mut release = Some(release);

    controller.drag_start(id("B"));
    let first = controller.drag_end(index, Some(id("D")), mutations);
    let second = async {
        tokio::task::yield_now().await;
        assert!(controller.is_committing());
        assert!(!controller.drag_start(id("A")));
        let outcome = controller.drag_end(index, Some(id("C")), mutations).await;
        if let Some(release) = release.take() {
            let _ = release.send(());
        }
        outcome
    };

    let (first, second) = tokio::join!(first, second);

    assert!(matches!(first, DragOutcome::Committed(_)));
    assert_eq!(second, DragOutcome::Busy);
    assert_eq!(mutations.calls().len(), 1);
    assert_eq!(controller.phase(), DragPhase::Idle);
}

#[tokio::test]
async fn test_rejection_returns_to_idle() {
    let controller = DragController::new();
    let rejection = MutationError::Rejected { status: 409, message: "would create a cycle".into() };
    let mutations = RecordingMutations::failing(rejection.clone());

    controller.drag_start(id("B"));
    let outcome = controller.drag_end(&flat_group(), Some(id("D")), &mutations).await;
    assert_eq!(outcome, DragOutcome::Failed(TreeError::Commit(rejection)));
    assert_eq!(controller.phase(), DragPhase::Idle);

    // still interactive
    assert!(controller.drag_start(id("A")));
    assert_eq!(controller.active_id(), Some(id("A")));
}

#[tokio::test]
async fn test_timeout_abandons_hung_commit() {
    let sleeper: Sleeper = Box::new(|d: Duration| tokio::time::sleep(d).boxed_local());
    let controller = DragController::new().with_timeout(Duration::from_millis(20), sleeper);
    let mutations = RecordingMutations::hanging();

    controller.drag_start(id("B"));
    let outcome = controller.drag_end(&flat_group(), Some(id("D")), &mutations).await;

    assert_eq!(outcome, DragOutcome::Failed(TreeError::TimedOut(Duration::from_millis(20))));
    assert_eq!(mutations.calls().len(), 1);
    assert!(controller.drag_start(id("C")));
}

#[tokio::test]
async fn test_timeout_tells_caller_to_refresh() {
    let sleeper: Sleeper = Box::new(|d: Duration| tokio::time::sleep(d).boxed_local());
    let controller = DragController::new().with_timeout(Duration::from_millis(20), sleeper);
    let mutations = RecordingMutations::hanging();

    controller.drag_start(id("1a"));
    controller.drag_end(&nested(), Some(id("2")), &mutations).await;

    let abandoned = mutations.abandoned.borrow();
    assert_eq!(abandoned.len(), 1);
    assert_eq!(
        abandoned[0],
        (
            DropIntent::Move { id: id("1a"), new_parent_id: None, new_order: None },
            TreeError::TimedOut(Duration::from_millis(20)),
        )
    );
}

#[tokio::test]
async fn test_settled_commit_is_not_abandoned() {
    let sleeper: Sleeper = Box::new(|d: Duration| tokio::time::sleep(d).boxed_local());
    let controller = DragController::new().with_timeout(Duration::from_secs(5), sleeper);
    let mutations = RecordingMutations::failing(MutationError::Transport("offline".into()));

    controller.drag_start(id("B"));
    let outcome = controller.drag_end(&flat_group(), Some(id("D")), &mutations).await;

    assert!(matches!(outcome, DragOutcome::Failed(TreeError::Commit(_))));
    assert!(mutations.abandoned.borrow().is_empty());
}

#[tokio::test]
async fn test_dropped_commit_restores_idle() {
    let controller = DragController::new();
    let mutations = RecordingMutations::hanging();
    let index = flat_group();

    controller.drag_start(id("B"));
    {
        let commit = controller.drag_end(&index, Some(id("D")), &mutations);
        let _ = tokio::time::timeout(Duration::from_millis(10), commit).await;
    }

    assert_eq!(controller.phase(), DragPhase::Idle);
}

#[tokio::test]
async fn test_phase_listener_sees_commit() {
    let controller = DragController::new();
    let mutations = RecordingMutations::default();
    let committing_seen = Rc::new(Cell::new(false));
    let transitions = Rc::new(Cell::new(0));

    let seen = committing_seen.clone();
    let count = transitions.clone();
    controller.set_phase_listener(move |phase: &DragPhase<CategoryId>| {
        count.set(count.get() + 1);
        if matches!(phase, DragPhase::Committing) {
            seen.set(true);
        }
    });

    controller.drag_start(id("A"));
    controller.drag_end(&flat_group(), Some(id("C")), &mutations).await;

    assert!(committing_seen.get());
    // Dragging, Committing, Idle
    assert_eq!(transitions.get(), 3);
}
