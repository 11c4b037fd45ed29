//! Adapters from drag-and-drop library events to board moves.
//!
//! Two board views report drops differently. The column board reports a
//! source and destination droppable with indices; the sortable board reports
//! only the dragged item and what it was released over. Both translate their
//! event into a [`DragGesture`] and share [`resolve_drop`] from there.

use crate::store::DropEffect;
use crate::{resolve_drop, BoardStateStore, Columns, DragGesture, DropOutcome, TaskId, TaskStatus};

/// A board view that turns its drop events into gestures.
pub trait BoardBinding {
    /// Drop event as reported by the view's drag-and-drop library.
    type Event;

    /// Translate a drop event. `None` when the event carries no drop.
    fn gesture(&self, columns: &Columns<'_>, event: &Self::Event) -> Option<DragGesture>;

    /// Where the event would put the task, without touching any state.
    fn resolve(&self, columns: &Columns<'_>, event: &Self::Event) -> DropOutcome {
        self.gesture(columns, event)
            .map_or(DropOutcome::Unresolved, |gesture| resolve_drop(&gesture, columns))
    }

    /// Apply a drop event to the store.
    fn drop_task(&self, store: &mut BoardStateStore, event: &Self::Event) -> Option<DropEffect> {
        let gesture = self.gesture(&store.columns(), event)?;
        Some(store.apply_drop(&gesture))
    }
}

/// A droppable and the index within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropLocation {
    pub droppable_id: String,
    pub index: usize,
}

impl DropLocation {
    pub fn new(droppable_id: impl Into<String>, index: usize) -> Self {
        Self {
            droppable_id: droppable_id.into(),
            index,
        }
    }
}

/// Drop event of the column-grouped board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDrop {
    pub draggable_id: String,
    pub source: DropLocation,
    /// `None` when released outside any column.
    pub destination: Option<DropLocation>,
}

/// Column-grouped board: one droppable per status column.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnBoard;

impl BoardBinding for ColumnBoard {
    type Event = ColumnDrop;

    fn gesture(&self, _columns: &Columns<'_>, event: &ColumnDrop) -> Option<DragGesture> {
        let destination = event.destination.as_ref()?;
        let source_status = TaskStatus::from_key(&event.source.droppable_id)?;
        Some(DragGesture {
            task_id: TaskId::new(event.draggable_id.as_str()),
            source_status,
            source_index: event.source.index,
            target: destination.droppable_id.clone(),
            target_index: Some(destination.index),
        })
    }
}

/// Drop event of the sortable-list board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortableDrop {
    pub active_id: String,
    /// Column key or task id under the pointer on release.
    pub over_id: Option<String>,
}

/// Sortable-list board: every card and every column is a drop target.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortableBoard;

impl BoardBinding for SortableBoard {
    type Event = SortableDrop;

    fn gesture(&self, columns: &Columns<'_>, event: &SortableDrop) -> Option<DragGesture> {
        let over = event.over_id.as_ref()?;
        if over == &event.active_id {
            return None;
        }
        let task_id = TaskId::new(event.active_id.as_str());
        let (source_status, source_index) = columns.locate(&task_id)?;
        Some(DragGesture {
            task_id,
            source_status,
            source_index,
            target: over.clone(),
            target_index: None,
        })
    }
}
