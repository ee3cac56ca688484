//! Project catalog and roster flows.

use crate::in_memory::helpers::{
    gateway, runtime, seed_assignment, seed_membership, seed_profile, seed_project, seed_task,
};
use rstest::rstest;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;
use trellis::gateway::InMemoryGateway;
use trellis::profile::domain::UserId;
use trellis::project::domain::ProjectId;
use trellis::project::services::{MembershipOutcome, ProjectCatalog, ProjectRoster};

/// Tests that a new project immediately lists for its owner.
#[rstest]
fn a_new_project_lists_for_its_owner(
    runtime: io::Result<Runtime>,
    gateway: Arc<InMemoryGateway>,
) {
    let rt = runtime.expect("runtime creation");
    gateway.sign_in(UserId::new("owner-1"));
    let catalog = ProjectCatalog::new(Arc::clone(&gateway));

    let created = rt.block_on(catalog.create_project("Spring fair")).expect("creation");
    let listed = rt
        .block_on(catalog.projects_for(&UserId::new("owner-1")))
        .expect("listing");

    assert_eq!(listed.len(), 1);
    assert_eq!(listed.first().map(|project| project.id()), Some(created.id()));
}

/// Tests that adding a member is idempotent and shows up in the roster.
#[rstest]
fn added_members_appear_in_the_roster_once(
    runtime: io::Result<Runtime>,
    gateway: Arc<InMemoryGateway>,
) {
    let rt = runtime.expect("runtime creation");
    seed_project(&gateway, 7, "Spring fair", "owner-1");
    seed_membership(&gateway, 7, "owner-1", 1);
    seed_profile(&gateway, "owner-1", "Anna");
    seed_profile(&gateway, "user-2", "Ben");
    let roster = ProjectRoster::new(Arc::clone(&gateway));

    let added = rt
        .block_on(roster.add_member(ProjectId::new(7), &UserId::new("user-2")))
        .expect("first add");
    let repeated = rt
        .block_on(roster.add_member(ProjectId::new(7), &UserId::new("user-2")))
        .expect("second add");

    assert!(matches!(added, MembershipOutcome::Added(_)));
    assert_eq!(repeated, MembershipOutcome::AlreadyMember);
    let members = rt.block_on(roster.members(ProjectId::new(7))).expect("roster");
    let names: Vec<&str> = members.iter().map(|member| member.display_name().as_str()).collect();
    assert_eq!(names, vec!["Anna", "Ben"]);
}

/// Tests that the member search matches name fragments case-insensitively.
#[rstest]
fn the_member_search_matches_name_fragments(
    runtime: io::Result<Runtime>,
    gateway: Arc<InMemoryGateway>,
) {
    let rt = runtime.expect("runtime creation");
    seed_profile(&gateway, "user-1", "Annabel");
    seed_profile(&gateway, "user-2", "Ben");
    let roster = ProjectRoster::new(Arc::clone(&gateway));

    let hits = rt.block_on(roster.search("anna")).expect("search");

    let names: Vec<&str> = hits.iter().map(|hit| hit.display_name().as_str()).collect();
    assert_eq!(names, vec!["Annabel"]);
}

/// Tests that deleting a project takes its tasks and assignments with it.
#[rstest]
fn deleting_a_project_cascades_through_its_records(
    runtime: io::Result<Runtime>,
    gateway: Arc<InMemoryGateway>,
) {
    let rt = runtime.expect("runtime creation");
    gateway.sign_in(UserId::new("owner-1"));
    seed_project(&gateway, 7, "Doomed", "owner-1");
    seed_membership(&gateway, 7, "owner-1", 1);
    seed_task(&gateway, 1, 7, "Hang the bunting", 1);
    seed_assignment(&gateway, 1, "owner-1");
    let catalog = ProjectCatalog::new(Arc::clone(&gateway));

    rt.block_on(catalog.delete_project(ProjectId::new(7))).expect("deletion");

    assert!(gateway.rows("projects").is_empty());
    assert!(gateway.rows("project_members").is_empty());
    assert!(gateway.rows("tasks").is_empty());
    assert!(gateway.rows("task_assignments").is_empty());
}
