//! Repository ports for task and tag persistence.
//!
//! One store usually implements both traits because the task-tag
//! association spans them. Method names differ between the two traits so a
//! store bound by both never has ambiguous calls.

use crate::board::domain::{OwnerId, Tag, TagId, Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Result type for tag repository operations.
pub type TagRepositoryResult<T> = Result<T, TagRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task together with its tag associations.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// Tag associations are replaced by the task's current tag set in the
    /// same atomic operation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists a task that was placed at an exact column position.
    ///
    /// Every other task of the same owner in the task's status whose order
    /// is at or past the task's order moves one slot down first. The shift
    /// and the write are atomic.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn reposition(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Deletes a task and its tag associations.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task owned by `owner`, in no particular order.
    async fn list_by_owner(&self, owner: OwnerId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the largest order among `owner`'s tasks in `status`.
    ///
    /// Returns `None` when the column is empty.
    async fn max_order(
        &self,
        owner: OwnerId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Option<i64>>;
}

/// Tag persistence contract.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Stores a new tag.
    ///
    /// # Errors
    ///
    /// Returns [`TagRepositoryError::DuplicateTag`] when the tag ID already
    /// exists.
    async fn store_tag(&self, tag: &Tag) -> TagRepositoryResult<()>;

    /// Persists a changed tag.
    ///
    /// # Errors
    ///
    /// Returns [`TagRepositoryError::NotFound`] when the tag does not exist.
    async fn update_tag(&self, tag: &Tag) -> TagRepositoryResult<()>;

    /// Removes every task association of the tag, then the tag itself, as one
    /// atomic operation.
    ///
    /// # Errors
    ///
    /// Returns [`TagRepositoryError::NotFound`] when the tag does not exist.
    async fn delete_tag(&self, id: TagId) -> TagRepositoryResult<()>;

    /// Finds a tag by identifier.
    async fn find_tag(&self, id: TagId) -> TagRepositoryResult<Option<Tag>>;

    /// Returns the tags among `ids` that exist. Missing ids are skipped.
    async fn find_tags(&self, ids: &[TagId]) -> TagRepositoryResult<Vec<Tag>>;

    /// Returns every tag sorted by name ascending.
    async fn list_tags(&self) -> TagRepositoryResult<Vec<Tag>>;
}

/// A store that persists both tasks and tags.
pub trait BoardStore: TaskRepository + TagRepository {}

impl<T: TaskRepository + TagRepository> BoardStore for T {}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Errors returned by tag repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TagRepositoryError {
    /// A tag with the same identifier already exists.
    #[error("duplicate tag identifier: {0}")]
    DuplicateTag(TagId),

    /// The tag was not found.
    #[error("tag not found: {0}")]
    NotFound(TagId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TagRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
