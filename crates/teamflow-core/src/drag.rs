//! Drop resolution shared by every board binding.
//!
//! A [`DragGesture`] names the dragged task, where it was picked up, and the
//! container it was released over. [`resolve_drop`] turns that into the
//! column and position the task should end up at. Resolution is pure: it only
//! reads the [`Columns`] snapshot.
//!
//! Indices are final positions within the destination column, counted
//! without the dragged task. Dropping over another task takes that task's
//! position, so in a different column the dragged task lands in front of it
//! and in the same column the two swap order.

use crate::{Columns, TaskId, TaskStatus};

/// A completed drag, independent of the drag-and-drop library that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragGesture {
    /// Task being dragged.
    pub task_id: TaskId,
    /// Column the task was picked up from.
    pub source_status: TaskStatus,
    /// Position within the source column.
    pub source_index: usize,
    /// Container released over: a column key or another task's id.
    pub target: String,
    /// Position reported by the library, if it reports one.
    pub target_index: Option<usize>,
}

/// Where a task should be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub status: TaskStatus,
    pub index: usize,
}

impl Placement {
    pub fn new(status: TaskStatus, index: usize) -> Self {
        Self { status, index }
    }
}

/// Result of resolving a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The task should move to this placement.
    Move(Placement),
    /// The gesture ends where it started.
    Unchanged,
    /// The gesture refers to something not on the board; ignore it.
    Unresolved,
}

impl DropOutcome {
    pub fn placement(&self) -> Option<Placement> {
        match self {
            Self::Move(placement) => Some(*placement),
            _ => None,
        }
    }
}

/// Resolve a drag gesture against the current columns.
pub fn resolve_drop(gesture: &DragGesture, columns: &Columns<'_>) -> DropOutcome {
    // A gesture whose source no longer matches the board is stale.
    match columns.locate(&gesture.task_id) {
        Some((status, index))
            if status == gesture.source_status && index == gesture.source_index => {}
        _ => return DropOutcome::Unresolved,
    }

    let target = if let Some(status) = TaskStatus::from_key(&gesture.target) {
        let capacity = capacity(columns, status, gesture.source_status);
        let index = gesture.target_index.unwrap_or(capacity).min(capacity);
        Placement::new(status, index)
    } else if gesture.target == gesture.task_id.as_str() {
        return DropOutcome::Unchanged;
    } else {
        let over = TaskId::new(gesture.target.as_str());
        let Some((status, index)) = columns.locate(&over) else {
            return DropOutcome::Unresolved;
        };
        let capacity = capacity(columns, status, gesture.source_status);
        Placement::new(status, index.min(capacity))
    };

    if target.status == gesture.source_status && target.index == gesture.source_index {
        DropOutcome::Unchanged
    } else {
        DropOutcome::Move(target)
    }
}

/// Highest valid insertion index in `status` once the dragged task is lifted out.
fn capacity(columns: &Columns<'_>, status: TaskStatus, source: TaskStatus) -> usize {
    let len = columns.len(status);
    if status == source {
        len.saturating_sub(1)
    } else {
        len
    }
}
