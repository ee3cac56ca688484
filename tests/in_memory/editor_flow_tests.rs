//! Task creation, revision, and deletion flows.

use crate::in_memory::helpers::{board_store, date, gateway, runtime, seed_task};
use rstest::rstest;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;
use trellis::board::domain::{Priority, TaskDraft, TaskId, TaskRevision, TaskStatus, TaskTitle};
use trellis::board::services::{CommandOutcome, TaskEditor};
use trellis::gateway::{GatewayError, InMemoryGateway};
use trellis::profile::domain::UserId;
use trellis::project::domain::ProjectId;

/// Tests that a created task lands remotely and on the loaded board.
#[rstest]
fn a_created_task_lands_on_both_sides(
    runtime: io::Result<Runtime>,
    gateway: Arc<InMemoryGateway>,
) {
    let rt = runtime.expect("runtime creation");
    gateway.sign_in(UserId::new("user-1"));
    let store = board_store(&gateway);
    rt.block_on(store.load(ProjectId::new(7))).expect("load");
    let editor = TaskEditor::new(Arc::clone(&store));
    let draft = TaskDraft::new("Hang the bunting")
        .with_description("Across the main hall")
        .with_due_date(date("2026-09-01"))
        .with_priority(Priority::High);

    let task = rt
        .block_on(editor.create(ProjectId::new(7), &draft))
        .expect("creation");

    assert_eq!(task.status(), TaskStatus::Todo);
    assert_eq!(store.find_task(task.id()).map(|found| found.priority()), Some(Priority::High));
    let stored = gateway.rows("tasks");
    let row = stored.first().expect("stored row");
    assert_eq!(row.read_i64("id"), Ok(task.id().value()));
    assert_eq!(row.read_str("due_date"), Ok("2026-09-01"));
}

/// Tests that a revision reaches the stored row and survives a reload.
#[rstest]
fn a_revision_reaches_the_stored_row(
    runtime: io::Result<Runtime>,
    gateway: Arc<InMemoryGateway>,
) {
    let rt = runtime.expect("runtime creation");
    seed_task(&gateway, 1, 7, "Hang the bunting", 1);
    let store = board_store(&gateway);
    rt.block_on(store.load(ProjectId::new(7))).expect("load");
    let editor = TaskEditor::new(Arc::clone(&store));
    let title = TaskTitle::new("Order the cake").expect("title");
    let revision = TaskRevision::new().with_title(title).with_priority(Priority::Low);

    let outcome = rt
        .block_on(editor.edit(TaskId::new(1), revision))
        .expect("edit");

    assert_eq!(outcome, CommandOutcome::Committed);
    rt.block_on(store.load(ProjectId::new(7))).expect("reload");
    let task = store.find_task(TaskId::new(1)).expect("task survives the reload");
    assert_eq!(task.title().as_str(), "Order the cake");
    assert_eq!(task.priority(), Priority::Low);
}

/// Tests that deletion confirms remotely before the board changes.
#[rstest]
fn a_deletion_confirms_before_the_board_changes(
    runtime: io::Result<Runtime>,
    gateway: Arc<InMemoryGateway>,
) {
    let rt = runtime.expect("runtime creation");
    seed_task(&gateway, 1, 7, "Doomed", 1);
    let store = board_store(&gateway);
    rt.block_on(store.load(ProjectId::new(7))).expect("load");
    let editor = TaskEditor::new(Arc::clone(&store));

    let outcome = rt.block_on(editor.delete(TaskId::new(1))).expect("deletion");

    assert_eq!(outcome, CommandOutcome::Committed);
    assert_eq!(store.find_task(TaskId::new(1)), None);
    assert!(gateway.rows("tasks").is_empty());
}

/// Tests that a refused deletion keeps the task visible.
#[rstest]
fn a_refused_deletion_keeps_the_task_visible(
    runtime: io::Result<Runtime>,
    gateway: Arc<InMemoryGateway>,
) {
    let rt = runtime.expect("runtime creation");
    seed_task(&gateway, 1, 7, "Stubborn", 1);
    let store = board_store(&gateway);
    rt.block_on(store.load(ProjectId::new(7))).expect("load");
    let editor = TaskEditor::new(Arc::clone(&store));
    gateway.fail_next_delete("tasks", GatewayError::backend("500", "unavailable"));

    let outcome = rt.block_on(editor.delete(TaskId::new(1)));

    assert!(outcome.is_err(), "the failed delete must surface");
    assert!(store.find_task(TaskId::new(1)).is_some());
    assert_eq!(gateway.rows("tasks").len(), 1);
}
