//! Error types for board domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task and tag values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The tag name is empty after trimming.
    #[error("tag name must not be empty")]
    EmptyTagName,

    /// The tag color is not a `#RRGGBB` hex string.
    #[error("invalid tag color '{0}', expected # followed by 6 hex digits")]
    InvalidTagColor(String),

    /// The column position is negative.
    #[error("invalid task order {0}, expected a non-negative integer")]
    NegativeOrder(i64),

    /// The requested column position is past the largest accepted slot.
    #[error("invalid task order {0}, expected at most {max}", max = super::MAX_ORDER)]
    OrderTooLarge(i64),

    /// A column has no slot left after its last task.
    #[error("column is full: no position after {0}")]
    ColumnFull(i64),

    /// The calendar date cannot be normalised to a due instant.
    #[error("invalid due date {0}")]
    InvalidDueDate(String),

    /// The owner identifier could not be parsed.
    #[error("invalid owner identifier '{0}'")]
    InvalidOwnerId(String),
}

/// Error returned while parsing task statuses from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
