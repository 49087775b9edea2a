//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod repository;

pub use repository::{
    BoardStore, TagRepository, TagRepositoryError, TagRepositoryResult, TaskRepository,
    TaskRepositoryError, TaskRepositoryResult,
};
