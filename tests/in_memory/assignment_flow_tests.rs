//! Assignment toggle and assignee hydration flows.

use crate::in_memory::helpers::{
    board_store, gateway, profile, runtime, seed_assignment, seed_profile, seed_task,
};
use rstest::rstest;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;
use trellis::board::domain::TaskId;
use trellis::board::services::{AssignmentChange, AssignmentManager};
use trellis::gateway::InMemoryGateway;
use trellis::project::domain::ProjectId;

/// Tests that a full toggle cycle writes and removes the assignment row.
#[rstest]
fn a_toggle_cycle_round_trips_the_assignment_row(
    runtime: io::Result<Runtime>,
    gateway: Arc<InMemoryGateway>,
) {
    let rt = runtime.expect("runtime creation");
    seed_task(&gateway, 1, 7, "Hang the bunting", 1);
    seed_profile(&gateway, "user-1", "Anna");
    let store = board_store(&gateway);
    rt.block_on(store.load(ProjectId::new(7))).expect("load");
    let manager = AssignmentManager::new(Arc::clone(&store));
    let anna = profile("user-1", "Anna");

    let on = rt.block_on(manager.toggle(TaskId::new(1), &anna)).expect("toggle on");
    assert_eq!(on, AssignmentChange::Assigned);
    assert_eq!(gateway.rows("task_assignments").len(), 1);
    assert_eq!(store.assignees_of(TaskId::new(1)), vec![anna.clone()]);

    let off = rt.block_on(manager.toggle(TaskId::new(1), &anna)).expect("toggle off");
    assert_eq!(off, AssignmentChange::Unassigned);
    assert!(gateway.rows("task_assignments").is_empty());
    assert!(store.assignees_of(TaskId::new(1)).is_empty());
}

/// Tests that hydration picks up rows written by other members.
#[rstest]
fn hydration_picks_up_assignments_made_elsewhere(
    runtime: io::Result<Runtime>,
    gateway: Arc<InMemoryGateway>,
) {
    let rt = runtime.expect("runtime creation");
    seed_task(&gateway, 1, 7, "Hang the bunting", 1);
    seed_profile(&gateway, "user-2", "Ben");
    let store = board_store(&gateway);
    rt.block_on(store.load(ProjectId::new(7))).expect("load");
    let manager = AssignmentManager::new(Arc::clone(&store));
    assert!(store.assignees_of(TaskId::new(1)).is_empty());

    // Another member assigns Ben after this board loaded.
    seed_assignment(&gateway, 1, "user-2");
    rt.block_on(manager.load_assignees(&[TaskId::new(1)])).expect("hydration");

    assert_eq!(store.assignees_of(TaskId::new(1)), vec![profile("user-2", "Ben")]);
}
