//! Column-partitioned board state and its mutation rules.

use std::collections::HashMap;

use super::ids::TaskId;
use super::mutation::BoardMutation;
use super::task::{Task, TaskRevision, TaskStatus};
use crate::profile::domain::{UserId, UserProfile};

/// The three fixed columns of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardColumn {
    /// Tasks not yet started.
    Todo,
    /// Tasks being worked.
    InProgress,
    /// Finished tasks.
    Done,
}

impl BoardColumn {
    /// All columns in display order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Returns the drop-target identifier for this column.
    #[must_use]
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }

    /// Maps a drop-target identifier back to a column.
    #[must_use]
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        match identifier {
            "todo" => Some(Self::Todo),
            "in-progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    /// Returns the workflow status stored for tasks in this column.
    #[must_use]
    pub const fn status(self) -> TaskStatus {
        match self {
            Self::Todo => TaskStatus::Todo,
            Self::InProgress => TaskStatus::InProgress,
            Self::Done => TaskStatus::Done,
        }
    }
}

/// Presentation order applied when reading a column.
///
/// Sorting is recomputed on every read and never written back to storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Earliest due date first; tasks without a due date last.
    #[default]
    DueDate,
    /// Highest priority first.
    Priority,
    /// Title, compared case-insensitively.
    Title,
}

/// In-memory snapshot of one project's tasks, partitioned by column.
///
/// Every task lives in exactly one of the three column buckets, determined
/// by its status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    todo: Vec<Task>,
    in_progress: Vec<Task>,
    done: Vec<Task>,
    assignees: HashMap<TaskId, Vec<UserProfile>>,
}

impl Board {
    /// Builds a board from loaded tasks and their assignee lists.
    ///
    /// Tasks are partitioned into columns by status; load order is kept
    /// within each column.
    #[must_use]
    pub fn from_parts(
        tasks: Vec<Task>,
        assignees: impl IntoIterator<Item = (TaskId, Vec<UserProfile>)>,
    ) -> Self {
        let mut board = Self {
            assignees: assignees.into_iter().collect(),
            ..Self::default()
        };
        for task in tasks {
            board.bucket_mut(task.status()).push(task);
        }
        board
    }

    /// Applies a mutation and returns the inverse that undoes it.
    ///
    /// Returns `None` when the mutation found nothing to change, for
    /// example because the targeted task is not on the board.
    #[must_use]
    pub fn apply(&mut self, mutation: BoardMutation) -> Option<BoardMutation> {
        match mutation {
            BoardMutation::InsertTask(task) => Some(self.insert_task(task)),
            BoardMutation::RemoveTask(task) => self.remove_task(task),
            BoardMutation::MoveTask { task, status } => self.move_task(task, status),
            BoardMutation::ReviseTask { task, revision } => self.revise_task(task, &revision),
            BoardMutation::AddAssignee { task, profile } => self.add_assignee(task, profile),
            BoardMutation::DropAssignee { task, user } => self.drop_assignee(task, &user),
            BoardMutation::SetAssignees { task, profiles } => {
                self.replace_assignees(task, profiles)
            }
        }
    }

    /// Looks up a task anywhere on the board.
    #[must_use]
    pub fn find_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks().find(|task| task.id() == id)
    }

    /// Iterates over every task on the board, column by column.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.todo
            .iter()
            .chain(self.in_progress.iter())
            .chain(self.done.iter())
    }

    /// Returns the number of tasks on the board.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    /// Returns the assignee list for a task.
    ///
    /// Tasks without assignees, and unknown tasks, yield an empty slice.
    #[must_use]
    pub fn assignees_of(&self, id: TaskId) -> &[UserProfile] {
        self.assignees.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Returns the tasks of one column, ordered by `sort`.
    ///
    /// The returned list is a copy of the bucket; the stored order is left
    /// alone.
    #[must_use]
    pub fn column(&self, column: BoardColumn, sort: SortBy) -> Vec<Task> {
        let mut tasks = self.bucket(column.status()).clone();
        sort_tasks(&mut tasks, sort);
        tasks
    }

    /// Replaces the assignee list for a task on the board.
    ///
    /// Lists targeting tasks that are not on the board are dropped.
    pub fn set_assignees(&mut self, id: TaskId, profiles: Vec<UserProfile>) {
        if self.find_task(id).is_some() {
            self.assignees.insert(id, profiles);
        }
    }

    fn insert_task(&mut self, task: Task) -> BoardMutation {
        let id = task.id();
        self.bucket_mut(task.status()).push(task);
        BoardMutation::RemoveTask(id)
    }

    fn remove_task(&mut self, id: TaskId) -> Option<BoardMutation> {
        let removed = self.take_task(id)?;
        self.assignees.remove(&id);
        Some(BoardMutation::InsertTask(removed))
    }

    fn move_task(&mut self, id: TaskId, status: TaskStatus) -> Option<BoardMutation> {
        let mut task = self.take_task(id)?;
        let previous = task.status();
        task.set_status(status);
        self.bucket_mut(status).push(task);
        Some(BoardMutation::MoveTask {
            task: id,
            status: previous,
        })
    }

    fn revise_task(&mut self, id: TaskId, revision: &TaskRevision) -> Option<BoardMutation> {
        let task = self.task_mut(id)?;
        let inverse = task.apply_revision(revision);
        Some(BoardMutation::ReviseTask {
            task: id,
            revision: inverse,
        })
    }

    fn add_assignee(&mut self, id: TaskId, profile: UserProfile) -> Option<BoardMutation> {
        if self.find_task(id).is_none() {
            return None;
        }
        let list = self.assignees.entry(id).or_default();
        if list.iter().any(|assigned| assigned.id() == profile.id()) {
            return None;
        }
        let user = profile.id().clone();
        list.push(profile);
        Some(BoardMutation::DropAssignee { task: id, user })
    }

    fn drop_assignee(&mut self, id: TaskId, user: &UserId) -> Option<BoardMutation> {
        let list = self.assignees.get_mut(&id)?;
        let position = list.iter().position(|assigned| assigned.id() == user)?;
        let profile = list.remove(position);
        Some(BoardMutation::AddAssignee { task: id, profile })
    }

    fn replace_assignees(
        &mut self,
        id: TaskId,
        profiles: Vec<UserProfile>,
    ) -> Option<BoardMutation> {
        if self.find_task(id).is_none() {
            return None;
        }
        let previous = self.assignees.insert(id, profiles).unwrap_or_default();
        Some(BoardMutation::SetAssignees {
            task: id,
            profiles: previous,
        })
    }

    fn take_task(&mut self, id: TaskId) -> Option<Task> {
        for bucket in [&mut self.todo, &mut self.in_progress, &mut self.done] {
            if let Some(position) = bucket.iter().position(|task| task.id() == id) {
                return Some(bucket.remove(position));
            }
        }
        None
    }

    fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.todo
            .iter_mut()
            .chain(self.in_progress.iter_mut())
            .chain(self.done.iter_mut())
            .find(|task| task.id() == id)
    }

    const fn bucket(&self, status: TaskStatus) -> &Vec<Task> {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    const fn bucket_mut(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
        }
    }
}

fn sort_tasks(tasks: &mut [Task], sort: SortBy) {
    match sort {
        SortBy::DueDate => {
            tasks.sort_by_key(|task| (task.due_date().is_none(), task.due_date()));
        }
        SortBy::Priority => tasks.sort_by_key(|task| std::cmp::Reverse(task.priority())),
        SortBy::Title => tasks.sort_by_key(|task| task.title().as_str().to_lowercase()),
    }
}
