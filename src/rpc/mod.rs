//! Remote procedure layer.
//!
//! Procedure names, typed payloads, the error taxonomy, JSON dispatch onto
//! the board services, caller authentication and the HTTP binding.

pub mod auth;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod procedures;
pub mod types;

pub use auth::{Authenticator, StaticTokenAuthenticator, bearer_token};
pub use dispatch::RpcRouter;
pub use error::{RpcError, RpcErrorKind};
pub use http::{AppState, build_router};
pub use procedures::{
    CreateTagParams, CreateTaskParams, IdParams, Procedure, ReorderTaskParams, SuccessResponse,
    TagView, TaskView, UpdateTagParams, UpdateTaskParams, parse_due_date,
};
pub use types::{RpcErrorBody, RpcResponse};

#[cfg(test)]
mod tests;
