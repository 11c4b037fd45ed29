//! Session-owned board state with optimistic moves.
//!
//! The store is the only writer of its task list. A status-changing move is
//! applied immediately and returns a [`MoveTicket`]; the ticket is persisted
//! elsewhere and its [`SyncResult`] fed back through
//! [`BoardStateStore::confirm_or_rollback`].
//!
//! Each task keeps a queue of its unreconciled moves, oldest first. Only the
//! newest move of a task may roll it back. A confirmed move settles every
//! older move of the same task, and a failed move that has already been
//! overtaken is discarded, handing its prior placement to the move that
//! overtook it.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, info, warn};

use crate::{
    resolve_drop, Columns, CoreError, DragGesture, DropOutcome, Placement, ProjectId,
    SyncCompletion, SyncResult, SyncState, Task, TaskId, TaskPatch, TaskStatus,
};

/// Sequence number of a status-changing move within one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MoveId(u64);

impl fmt::Display for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A status change that must be persisted exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTicket {
    pub move_id: MoveId,
    pub task_id: TaskId,
    /// Status the task was optimistically moved to.
    pub target: TaskStatus,
}

#[cfg(test)]
impl MoveTicket {
    pub(crate) fn for_test(task_id: &str, target: TaskStatus) -> Self {
        Self {
            move_id: MoveId(0),
            task_id: TaskId::new(task_id),
            target,
        }
    }
}

/// How a sync result was applied to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// The optimistic state is now final.
    Confirmed,
    /// The move was reverted.
    RolledBack { restored: Placement, reason: String },
    /// The result belonged to a move that has since been overtaken; ignored.
    Stale,
}

/// What a drop did to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEffect {
    pub outcome: DropOutcome,
    /// Present when the drop changed the task's status.
    pub ticket: Option<MoveTicket>,
}

#[derive(Debug, Clone)]
struct PendingMove {
    move_id: MoveId,
    prior: Placement,
    target: TaskStatus,
}

/// Board state for one view.
#[derive(Debug, Default)]
pub struct BoardStateStore {
    tasks: Vec<Task>,
    pending: HashMap<TaskId, Vec<PendingMove>>,
    next_move: u64,
    last_error: Option<String>,
}

impl BoardStateStore {
    /// Create a store holding `tasks` in the given order.
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            ..Self::default()
        }
    }

    /// Replace the task list after a fetch. Outstanding moves become stale.
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        debug!(count = tasks.len(), "Replacing board tasks");
        self.tasks = tasks;
        self.pending.clear();
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Current column partition.
    pub fn columns(&self) -> Columns<'_> {
        Columns::from_tasks(&self.tasks)
    }

    /// Column and position of a task.
    pub fn placement(&self, id: &TaskId) -> Option<Placement> {
        let status = self.task(id)?.status;
        let index = self
            .tasks
            .iter()
            .filter(|t| t.status == status)
            .position(|t| &t.id == id)?;
        Some(Placement::new(status, index))
    }

    pub fn sync_state(&self, id: &TaskId) -> SyncState {
        match self.pending.get(id) {
            Some(queue) if !queue.is_empty() => SyncState::PendingSync {
                outstanding: queue.len(),
            },
            _ => SyncState::Settled,
        }
    }

    /// Reason of the most recent rollback.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Take the most recent rollback reason, clearing it.
    pub fn take_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    /// Add a newly created task at the end of the list.
    pub fn insert_task(&mut self, task: Task) -> Result<(), CoreError> {
        if self.task(&task.id).is_some() {
            return Err(CoreError::InvalidInput(format!(
                "task {} already on board",
                task.id
            )));
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Apply an external edit. A status edit makes unreconciled moves of the
    /// task stale; other edits leave them in flight.
    pub fn update_task(&mut self, id: &TaskId, patch: TaskPatch) -> Result<(), CoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))?;
        // Only a status edit supersedes in-flight moves.
        let supersedes = patch.status.is_some();
        task.apply(patch);
        if supersedes {
            self.pending.remove(id);
        }
        Ok(())
    }

    pub fn remove_task(&mut self, id: &TaskId) -> Result<Task, CoreError> {
        let index = self
            .tasks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))?;
        self.pending.remove(id);
        Ok(self.tasks.remove(index))
    }

    /// Drop every task of a deleted project. Returns how many were removed.
    pub fn remove_project(&mut self, project_id: &ProjectId) -> usize {
        let before = self.tasks.len();
        let pending = &mut self.pending;
        self.tasks.retain(|t| {
            let keep = &t.project_id != project_id;
            if !keep {
                pending.remove(&t.id);
            }
            keep
        });
        before - self.tasks.len()
    }

    /// Resolve a gesture against the current columns and apply it.
    pub fn apply_drop(&mut self, gesture: &DragGesture) -> DropEffect {
        let outcome = resolve_drop(gesture, &self.columns());
        let ticket = match outcome {
            DropOutcome::Move(placement) => self
                .move_task(&gesture.task_id, placement.status, placement.index)
                .unwrap_or_else(|e| {
                    debug!(error = %e, "Ignoring drop");
                    None
                }),
            DropOutcome::Unchanged => None,
            DropOutcome::Unresolved => {
                debug!(task_id = %gesture.task_id, target = %gesture.target, "Unresolved drop ignored");
                None
            }
        };
        DropEffect { outcome, ticket }
    }

    /// Move a task to `index` within the `status` column.
    ///
    /// Returns a ticket when the status changed; reorders within a column are
    /// local only.
    pub fn move_task(
        &mut self,
        id: &TaskId,
        status: TaskStatus,
        index: usize,
    ) -> Result<Option<MoveTicket>, CoreError> {
        let prior = self
            .placement(id)
            .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))?;
        let target = Placement::new(status, index);
        if prior == target {
            return Ok(None);
        }

        self.place(id, target);

        if prior.status == status {
            debug!(task_id = %id, status = %status, from = prior.index, to = index, "Reordered task");
            return Ok(None);
        }

        let move_id = MoveId(self.next_move);
        self.next_move += 1;
        self.pending.entry(id.clone()).or_default().push(PendingMove {
            move_id,
            prior,
            target: status,
        });
        debug!(task_id = %id, %move_id, from = %prior.status, to = %status, "Optimistic status change");

        Ok(Some(MoveTicket {
            move_id,
            task_id: id.clone(),
            target: status,
        }))
    }

    /// Apply the backend's answer for a move.
    pub fn confirm_or_rollback(&mut self, ticket: &MoveTicket, result: &SyncResult) -> Reconciliation {
        let id = &ticket.task_id;
        let Some(queue) = self.pending.get_mut(id) else {
            debug!(task_id = %id, move_id = %ticket.move_id, "Result for settled task ignored");
            return Reconciliation::Stale;
        };
        let Some(pos) = queue.iter().position(|m| m.move_id == ticket.move_id) else {
            debug!(task_id = %id, move_id = %ticket.move_id, "Result for superseded move ignored");
            return Reconciliation::Stale;
        };

        let reason = match result {
            SyncResult::Synced => {
                queue.drain(..=pos);
                if queue.is_empty() {
                    self.pending.remove(id);
                }
                info!(task_id = %id, move_id = %ticket.move_id, status = %ticket.target, "Status change confirmed");
                return Reconciliation::Confirmed;
            }
            SyncResult::Failed { reason } => reason.clone(),
        };

        let failed = queue.remove(pos);
        let newest = pos == queue.len();
        let live = self.tasks.iter().find(|t| &t.id == id).map(|t| t.status);

        if !newest || live != Some(failed.target) {
            // The backend never took this status, so a newer move reverting
            // must go back to where this one started.
            if let Some(next) = queue.get_mut(pos) {
                next.prior = failed.prior;
            }
            if queue.is_empty() {
                self.pending.remove(id);
            }
            debug!(task_id = %id, move_id = %ticket.move_id, %reason, "Stale failure ignored");
            return Reconciliation::Stale;
        }

        if queue.is_empty() {
            self.pending.remove(id);
        }
        self.place(id, failed.prior);
        warn!(
            task_id = %id,
            move_id = %ticket.move_id,
            restored = %failed.prior.status,
            %reason,
            "Status change failed, rolled back"
        );
        self.last_error = Some(reason.clone());
        Reconciliation::RolledBack {
            restored: failed.prior,
            reason,
        }
    }

    /// Reconcile a completed sync.
    pub fn reconcile(&mut self, completion: &SyncCompletion) -> Reconciliation {
        self.confirm_or_rollback(&completion.ticket, &completion.result)
    }

    fn place(&mut self, id: &TaskId, placement: Placement) {
        let Some(from) = self.tasks.iter().position(|t| &t.id == id) else {
            return;
        };
        let mut task = self.tasks.remove(from);
        task.status = placement.status;
        let at = self.insertion_point(placement);
        self.tasks.insert(at, task);
    }

    /// List index at which a task lands at `placement.index` of its column.
    fn insertion_point(&self, placement: Placement) -> usize {
        let mut seen = 0;
        let mut last = None;
        for (i, task) in self.tasks.iter().enumerate() {
            if task.status != placement.status {
                continue;
            }
            if seen == placement.index {
                return i;
            }
            seen += 1;
            last = Some(i);
        }
        last.map_or(self.tasks.len(), |i| i + 1)
    }
}
