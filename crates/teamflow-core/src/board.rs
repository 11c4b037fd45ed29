//! Column partition of a task list.

use crate::{Task, TaskId, TaskStatus};

/// Tasks grouped by status, each column in list order.
///
/// Derived from the task list on demand and never stored.
#[derive(Debug, Clone)]
pub struct Columns<'a> {
    columns: [Vec<&'a Task>; 3],
}

impl<'a> Columns<'a> {
    /// Partition `tasks` into the three status columns.
    pub fn from_tasks(tasks: &'a [Task]) -> Self {
        let mut columns: [Vec<&'a Task>; 3] = Default::default();
        for task in tasks {
            columns[slot(task.status)].push(task);
        }
        Self { columns }
    }

    /// Tasks in the column for `status`.
    pub fn column(&self, status: TaskStatus) -> &[&'a Task] {
        &self.columns[slot(status)]
    }

    /// Number of tasks in the column for `status`.
    pub fn len(&self, status: TaskStatus) -> usize {
        self.columns[slot(status)].len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Vec::is_empty)
    }

    /// Column and position of a task.
    pub fn locate(&self, id: &TaskId) -> Option<(TaskStatus, usize)> {
        TaskStatus::ALL.into_iter().find_map(|status| {
            self.column(status)
                .iter()
                .position(|t| &t.id == id)
                .map(|index| (status, index))
        })
    }

    /// Task ids of a column, in order.
    pub fn ids(&self, status: TaskStatus) -> Vec<&'a TaskId> {
        self.column(status).iter().map(|t| &t.id).collect()
    }

    /// Iterate over `(status, tasks)` in board order.
    pub fn iter(&self) -> impl Iterator<Item = (TaskStatus, &[&'a Task])> + '_ {
        TaskStatus::ALL
            .into_iter()
            .map(move |status| (status, self.column(status)))
    }
}

fn slot(status: TaskStatus) -> usize {
    match status {
        TaskStatus::Todo => 0,
        TaskStatus::InProgress => 1,
        TaskStatus::Done => 2,
    }
}
