//! TeamFlow Core Board Types
//!
//! This crate contains the board logic with no dependencies on:
//! - HTTP transport
//! - Rendering or drag-and-drop libraries
//! - Runtime specifics
//!
//! The flow is: a binding turns a drop event into a [`DragGesture`],
//! [`resolve_drop`] turns the gesture into a [`Placement`], the
//! [`BoardStateStore`] applies it optimistically and hands back a
//! [`MoveTicket`], and the ticket is persisted through a [`SyncGateway`]
//! before being reconciled with the store.

pub mod binding;
pub mod board;
pub mod drag;
pub mod error;
pub mod ids;
pub mod status;
pub mod store;
pub mod sync;
pub mod task;

// Re-export commonly used types
pub use binding::{BoardBinding, ColumnBoard, ColumnDrop, DropLocation, SortableBoard, SortableDrop};
pub use board::Columns;
pub use drag::{resolve_drop, DragGesture, DropOutcome, Placement};
pub use error::CoreError;
pub use ids::{ProjectId, TaskId, UserId};
pub use status::{SyncState, TaskStatus};
pub use store::{BoardStateStore, DropEffect, MoveId, MoveTicket, Reconciliation};
pub use sync::{SyncCompletion, SyncGateway, SyncResult};
pub use task::{Task, TaskPatch};
