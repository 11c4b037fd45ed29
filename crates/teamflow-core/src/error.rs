//! Core board errors.

use thiserror::Error;

/// Core domain errors for TeamFlow.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Task not found in the board.
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Status key outside `todo`, `in-progress`, `done`.
    #[error("Invalid task status: {0}")]
    InvalidStatus(String),

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
