//! Board loading and drag reconciliation flows.
//!
//! Exercises the drop-gesture path end to end: optimistic local moves,
//! persisted status writes, and rollback when the backend refuses.

use crate::in_memory::helpers::{board_store, gateway, runtime, seed_task};
use rstest::rstest;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;
use trellis::board::domain::{BoardColumn, SortBy, TaskId, TaskStatus};
use trellis::board::services::{DragOutcome, DragReconciler};
use trellis::gateway::{GatewayError, InMemoryGateway};
use trellis::project::domain::ProjectId;

/// Tests that a drag lands on the board and in the stored row.
#[rstest]
fn a_drag_reconciles_through_to_the_stored_row(
    runtime: io::Result<Runtime>,
    gateway: Arc<InMemoryGateway>,
) {
    let rt = runtime.expect("runtime creation");
    seed_task(&gateway, 1, 7, "Hang the bunting", 1);
    let store = board_store(&gateway);
    rt.block_on(store.load(ProjectId::new(7))).expect("load");
    let reconciler = DragReconciler::new(Arc::clone(&store));

    let outcome = rt
        .block_on(reconciler.drag_end(TaskId::new(1), Some("done")))
        .expect("drag");

    assert_eq!(outcome, DragOutcome::Moved);
    let done = store.column(BoardColumn::Done, SortBy::DueDate);
    assert_eq!(done.len(), 1);
    let stored = gateway.rows("tasks");
    let row = stored.first().expect("stored row");
    assert_eq!(row.read_i64("status"), Ok(3));
}

/// Tests that a refused status write leaves both sides as they were.
#[rstest]
fn a_refused_write_rolls_back_on_both_sides(
    runtime: io::Result<Runtime>,
    gateway: Arc<InMemoryGateway>,
) {
    let rt = runtime.expect("runtime creation");
    seed_task(&gateway, 1, 7, "Hang the bunting", 1);
    let store = board_store(&gateway);
    rt.block_on(store.load(ProjectId::new(7))).expect("load");
    let reconciler = DragReconciler::new(Arc::clone(&store));
    gateway.fail_next_update("tasks", GatewayError::backend("500", "unavailable"));

    let outcome = rt.block_on(reconciler.drag_end(TaskId::new(1), Some("done")));

    assert!(outcome.is_err(), "the failed write must surface");
    let task = store.find_task(TaskId::new(1)).expect("task stays on the board");
    assert_eq!(task.status(), TaskStatus::Todo);
    let stored = gateway.rows("tasks");
    let row = stored.first().expect("stored row");
    assert_eq!(row.read_i64("status"), Ok(1));
}

/// Tests that drags of two different tasks land independently.
#[rstest]
fn drags_of_two_tasks_land_independently(
    runtime: io::Result<Runtime>,
    gateway: Arc<InMemoryGateway>,
) {
    let rt = runtime.expect("runtime creation");
    seed_task(&gateway, 1, 7, "Hang the bunting", 1);
    seed_task(&gateway, 2, 7, "Order the cake", 1);
    let store = board_store(&gateway);
    rt.block_on(store.load(ProjectId::new(7))).expect("load");
    let reconciler = DragReconciler::new(Arc::clone(&store));

    let (first, second) = rt.block_on(async {
        tokio::join!(
            reconciler.drag_end(TaskId::new(1), Some("done")),
            reconciler.drag_end(TaskId::new(2), Some("in-progress")),
        )
    });

    assert_eq!(first.expect("first drag"), DragOutcome::Moved);
    assert_eq!(second.expect("second drag"), DragOutcome::Moved);
    assert_eq!(store.column(BoardColumn::Done, SortBy::DueDate).len(), 1);
    assert_eq!(store.column(BoardColumn::InProgress, SortBy::DueDate).len(), 1);
    assert!(store.column(BoardColumn::Todo, SortBy::DueDate).is_empty());
}

/// Tests that a reload after a drag sees the same remote truth.
#[rstest]
fn a_reload_reflects_the_persisted_move(
    runtime: io::Result<Runtime>,
    gateway: Arc<InMemoryGateway>,
) {
    let rt = runtime.expect("runtime creation");
    seed_task(&gateway, 1, 7, "Hang the bunting", 1);
    let store = board_store(&gateway);
    rt.block_on(store.load(ProjectId::new(7))).expect("load");
    let reconciler = DragReconciler::new(Arc::clone(&store));
    rt.block_on(reconciler.drag_end(TaskId::new(1), Some("done"))).expect("drag");

    rt.block_on(store.load(ProjectId::new(7))).expect("reload");

    let task = store.find_task(TaskId::new(1)).expect("task survives the reload");
    assert_eq!(task.status(), TaskStatus::Done);
}
