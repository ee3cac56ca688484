//! Shared test helpers for the in-memory gateway integration tests.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;
use trellis::board::services::BoardStore;
use trellis::gateway::{InMemoryGateway, Row};
use trellis::profile::domain::{DisplayName, UserId, UserProfile};

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides a fresh gateway with backend-assigned ids on the serial tables.
#[fixture]
pub fn gateway() -> Arc<InMemoryGateway> {
    Arc::new(
        InMemoryGateway::new()
            .with_serial_ids("projects")
            .with_serial_ids("tasks"),
    )
}

/// Builds a board store over the shared gateway.
pub fn board_store(gateway: &Arc<InMemoryGateway>) -> Arc<BoardStore<InMemoryGateway>> {
    Arc::new(BoardStore::new(Arc::clone(gateway)))
}

/// Clock pinned to midday on a fixed date, so due-date windows do not
/// depend on when or where the tests run.
pub struct FixedClock(NaiveDate);

impl FixedClock {
    /// Pins the clock to `raw`, an ISO calendar date.
    #[must_use]
    pub fn pinned(raw: &str) -> Self {
        Self(date(raw))
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        let noon = self.0.and_hms_opt(12, 0, 0).expect("midday should exist");
        Local
            .from_local_datetime(&noon)
            .single()
            .expect("midday should be unambiguous")
    }

    fn utc(&self) -> DateTime<Utc> {
        self.local().with_timezone(&Utc)
    }
}

/// Parses an ISO calendar date.
pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("test date should parse")
}

/// Builds the profile value stored by [`seed_profile`].
#[must_use]
pub fn profile(id: &str, name: &str) -> UserProfile {
    let display_name = DisplayName::new(name).expect("test name should be valid");
    UserProfile::new(UserId::new(id), display_name, None)
}

/// Seeds a stored task row without optional columns.
pub fn seed_task(gateway: &InMemoryGateway, id: i64, project: i64, title: &str, status: i64) {
    gateway.seed_rows(
        "tasks",
        [Row::new()
            .with("id", id)
            .with("project_id", project)
            .with("title", title)
            .with("priority", "medium")
            .with("status", status)
            .with("creator_id", "user-1")],
    );
}

/// Seeds a profile row without an avatar.
pub fn seed_profile(gateway: &InMemoryGateway, id: &str, name: &str) {
    gateway.seed_rows(
        "user_profiles",
        [Row::new().with("id", id).with("display_name", name)],
    );
}

/// Seeds a project row.
pub fn seed_project(gateway: &InMemoryGateway, id: i64, name: &str, owner: &str) {
    gateway.seed_rows(
        "projects",
        [Row::new().with("id", id).with("name", name).with("owner_id", owner)],
    );
}

/// Seeds a membership row.
pub fn seed_membership(gateway: &InMemoryGateway, project: i64, user: &str, share: i64) {
    gateway.seed_rows(
        "project_members",
        [Row::new()
            .with("project_id", project)
            .with("user_id", user)
            .with("share_id", share)],
    );
}

/// Seeds an assignment row.
pub fn seed_assignment(gateway: &InMemoryGateway, task: i64, user: &str) {
    gateway.seed_rows(
        "task_assignments",
        [Row::new().with("taskid", task).with("tauid", user)],
    );
}
