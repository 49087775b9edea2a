//! Procedure error taxonomy and its mapping from service errors.

use super::types::RpcErrorBody;
use crate::board::{
    ports::{TagRepositoryError, TaskRepositoryError},
    services::{TagServiceError, TaskBoardError},
};
use axum::http::StatusCode;
use std::fmt;

/// Invalid input.
pub const BAD_REQUEST: &str = "BAD_REQUEST";
/// Missing or invalid credentials.
pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
/// Caller does not own the resource.
pub const FORBIDDEN: &str = "FORBIDDEN";
/// Resource or procedure does not exist.
pub const NOT_FOUND: &str = "NOT_FOUND";
/// Unexpected server-side failure.
pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";

const INTERNAL_MESSAGE: &str = "internal server error";

/// Category of a procedure failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcErrorKind {
    /// Input failed validation.
    Validation,
    /// The resource does not exist.
    NotFound,
    /// The caller may not touch the resource.
    Forbidden,
    /// Unexpected failure; details are logged, not returned.
    Internal,
    /// No authenticated caller.
    Unauthorized,
}

impl RpcErrorKind {
    /// Returns the wire error code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Validation => BAD_REQUEST,
            Self::NotFound => NOT_FOUND,
            Self::Forbidden => FORBIDDEN,
            Self::Internal => INTERNAL_SERVER_ERROR,
            Self::Unauthorized => UNAUTHORIZED,
        }
    }

    /// Returns the HTTP status used by the HTTP binding.
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

/// Error returned by procedure dispatch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RpcError {
    kind: RpcErrorKind,
    message: String,
}

impl RpcError {
    /// Creates an error of `kind`.
    #[must_use]
    pub fn new(kind: RpcErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(RpcErrorKind::Validation, message)
    }

    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(RpcErrorKind::NotFound, message)
    }

    /// Creates a forbidden error.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(RpcErrorKind::Forbidden, message)
    }

    /// Creates an unauthorized error.
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(RpcErrorKind::Unauthorized, "authentication required")
    }

    /// Logs `source` and returns an internal error with a generic message.
    #[must_use]
    pub fn internal(source: &dyn fmt::Display) -> Self {
        tracing::error!(error = %source, "procedure failed");
        Self::new(RpcErrorKind::Internal, INTERNAL_MESSAGE)
    }

    /// Returns the error category.
    #[must_use]
    pub const fn kind(&self) -> RpcErrorKind {
        self.kind
    }

    /// Returns the caller-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Converts to the wire error body.
    #[must_use]
    pub fn to_error_body(&self) -> RpcErrorBody {
        RpcErrorBody {
            code: self.kind.code().to_owned(),
            message: self.message.clone(),
        }
    }
}

impl From<TaskBoardError> for RpcError {
    fn from(err: TaskBoardError) -> Self {
        match err {
            TaskBoardError::Domain(_) => Self::validation(err.to_string()),
            TaskBoardError::NotFound(_)
            | TaskBoardError::UnknownTag(_)
            | TaskBoardError::Repository(TaskRepositoryError::NotFound(_))
            | TaskBoardError::TagRepository(TagRepositoryError::NotFound(_)) => {
                Self::not_found(err.to_string())
            }
            TaskBoardError::Forbidden(_) => Self::forbidden(err.to_string()),
            TaskBoardError::Repository(_) | TaskBoardError::TagRepository(_) => {
                Self::internal(&err)
            }
        }
    }
}

impl From<TagServiceError> for RpcError {
    fn from(err: TagServiceError) -> Self {
        match err {
            TagServiceError::Domain(_) => Self::validation(err.to_string()),
            TagServiceError::NotFound(_)
            | TagServiceError::Repository(TagRepositoryError::NotFound(_)) => {
                Self::not_found(err.to_string())
            }
            TagServiceError::Repository(_) => Self::internal(&err),
        }
    }
}
