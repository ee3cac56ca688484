//! End-to-end due-date digests over seeded project data.

use crate::in_memory::helpers::{
    FixedClock, gateway, runtime, seed_membership, seed_project, seed_task,
};
use rstest::rstest;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;
use trellis::board::domain::ReminderEntry;
use trellis::board::services::ReminderService;
use trellis::gateway::{InMemoryGateway, Row};
use trellis::profile::domain::UserId;

const TODAY: &str = "2026-08-25";

/// Seeds a stored task row carrying a due date.
fn seed_dated_task(gateway: &InMemoryGateway, id: i64, project: i64, title: &str, due: &str) {
    gateway.seed_rows(
        "tasks",
        [Row::new()
            .with("id", id)
            .with("project_id", project)
            .with("title", title)
            .with("due_date", due)
            .with("priority", "medium")
            .with("status", 1)
            .with("creator_id", "user-1")],
    );
}

fn service(gateway: &Arc<InMemoryGateway>) -> ReminderService<InMemoryGateway, FixedClock> {
    ReminderService::new(Arc::clone(gateway), Arc::new(FixedClock::pinned(TODAY)))
}

fn ids_of(entries: &[ReminderEntry]) -> Vec<i64> {
    entries.iter().map(|entry| entry.task().id().value()).collect()
}

/// Tests that the digest spans every project the user belongs to.
#[rstest]
fn the_digest_collects_tasks_across_projects(
    runtime: io::Result<Runtime>,
    gateway: Arc<InMemoryGateway>,
) {
    let rt = runtime.expect("runtime creation");
    seed_project(&gateway, 7, "Spring fair", "user-1");
    seed_project(&gateway, 8, "Bake sale", "user-1");
    seed_membership(&gateway, 7, "user-1", 71);
    seed_membership(&gateway, 8, "user-1", 81);
    seed_dated_task(&gateway, 1, 7, "Hang the bunting", "2026-08-24");
    seed_dated_task(&gateway, 2, 8, "Order the flour", "2026-08-26");
    seed_task(&gateway, 3, 7, "Book the hall", 1);

    let digest = rt
        .block_on(service(&gateway).digest(&UserId::new("user-1")))
        .expect("digest");

    assert_eq!(ids_of(digest.overdue()), vec![1]);
    assert_eq!(ids_of(digest.upcoming()), vec![2]);
    let names: Vec<&str> = digest
        .overdue()
        .iter()
        .chain(digest.upcoming())
        .map(|entry| entry.project_name().as_str())
        .collect();
    assert_eq!(names, vec!["Spring fair", "Bake sale"]);
}

/// Tests that tasks overdue past the lookback window age out.
#[rstest]
fn long_overdue_tasks_age_out_of_the_digest(
    runtime: io::Result<Runtime>,
    gateway: Arc<InMemoryGateway>,
) {
    let rt = runtime.expect("runtime creation");
    seed_project(&gateway, 7, "Spring fair", "user-1");
    seed_membership(&gateway, 7, "user-1", 71);
    seed_dated_task(&gateway, 1, 7, "Collect the raffle prizes", "2026-08-22");
    seed_dated_task(&gateway, 2, 7, "Print the posters", "2026-08-21");

    let digest = rt
        .block_on(service(&gateway).digest(&UserId::new("user-1")))
        .expect("digest");

    assert_eq!(ids_of(digest.overdue()), vec![1]);
    assert!(digest.upcoming().is_empty());
}

/// Tests that a user without memberships gets an empty digest from a
/// single query.
#[rstest]
fn no_memberships_yield_an_empty_digest(
    runtime: io::Result<Runtime>,
    gateway: Arc<InMemoryGateway>,
) {
    let rt = runtime.expect("runtime creation");

    let digest = rt
        .block_on(service(&gateway).digest(&UserId::new("user-1")))
        .expect("digest");

    assert!(digest.is_empty());
    assert_eq!(gateway.journal().len(), 1);
}
