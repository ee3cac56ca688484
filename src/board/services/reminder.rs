//! Cross-project due-date digests.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use mockable::Clock;

use crate::board::domain::{ReminderDigest, ReminderEntry, Task, TaskStatus};
use crate::board::schema::{TASKS_TABLE, task_from_row};
use crate::gateway::{DataGateway, FetchError, Filter};
use crate::profile::domain::UserId;
use crate::project::domain::{Project, ProjectId, ProjectName};
use crate::project::schema::{MEMBERS_TABLE, PROJECTS_TABLE, project_from_row};

/// How many days an overdue task keeps appearing in the digest.
const OVERDUE_WINDOW_DAYS: u64 = 3;

/// Collects due and nearly-due tasks across all of a user's projects.
#[derive(Clone)]
pub struct ReminderService<G, C>
where
    G: DataGateway,
    C: Clock + Send + Sync,
{
    gateway: Arc<G>,
    clock: Arc<C>,
}

impl<G, C> ReminderService<G, C>
where
    G: DataGateway,
    C: Clock + Send + Sync,
{
    /// Creates a service reading through the given gateway and clock.
    #[must_use]
    pub const fn new(gateway: Arc<G>, clock: Arc<C>) -> Self {
        Self { gateway, clock }
    }

    /// Builds the user's due-date digest.
    ///
    /// Collects tasks from every project the user is a member of, omits
    /// finished tasks and tasks without a due date, and partitions the
    /// rest against the clock's local date: overdue covers due dates
    /// within the trailing three-day window, and everything due today or
    /// later is upcoming. Entries are ordered by due date ascending and
    /// carry their project's name.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when a query fails or a row cannot be
    /// decoded.
    pub async fn digest(&self, user: &UserId) -> Result<ReminderDigest, FetchError> {
        let membership_filter = Filter::new().eq("user_id", user.as_str());
        let membership_rows = self
            .gateway
            .query_rows(MEMBERS_TABLE, &membership_filter)
            .await?;
        let project_ids: Vec<i64> = membership_rows
            .iter()
            .map(|row| row.read_i64("project_id"))
            .collect::<Result<_, _>>()?;
        if project_ids.is_empty() {
            return Ok(ReminderDigest::default());
        }
        let project_filter = Filter::new().one_of("id", project_ids.clone());
        let project_rows = self
            .gateway
            .query_rows(PROJECTS_TABLE, &project_filter)
            .await?;
        let projects = project_rows
            .iter()
            .map(project_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        let task_filter = Filter::new().one_of("project_id", project_ids);
        let task_rows = self.gateway.query_rows(TASKS_TABLE, &task_filter).await?;
        let tasks = task_rows
            .iter()
            .map(task_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        let today = self.clock.local().date_naive();
        Ok(build_digest(&projects, tasks, today))
    }
}

/// Partitions tasks into the overdue and upcoming buckets for `today`.
fn build_digest(projects: &[Project], tasks: Vec<Task>, today: NaiveDate) -> ReminderDigest {
    let cutoff = today
        .checked_sub_days(Days::new(OVERDUE_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MIN);
    let mut dated: Vec<(NaiveDate, Task)> = tasks
        .into_iter()
        .filter(|task| task.status() != TaskStatus::Done)
        .filter_map(|task| task.due_date().map(|due| (due, task)))
        .collect();
    dated.sort_by_key(|(due, task)| (*due, task.id()));
    let mut overdue = Vec::new();
    let mut upcoming = Vec::new();
    for (due, task) in dated {
        if due < cutoff {
            continue;
        }
        let Some(name) = project_name(projects, task.project_id()) else {
            tracing::warn!(
                project = task.project_id().value(),
                "task references a missing project"
            );
            continue;
        };
        let entry = ReminderEntry::new(task, name.clone());
        if due < today {
            overdue.push(entry);
        } else {
            upcoming.push(entry);
        }
    }
    ReminderDigest::new(overdue, upcoming)
}

fn project_name(projects: &[Project], id: ProjectId) -> Option<&ProjectName> {
    projects
        .iter()
        .find(|project| project.id() == id)
        .map(Project::name)
}
