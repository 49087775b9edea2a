//! Ownership-checked task operations.

use super::CallerContext;
use crate::board::{
    domain::{
        BoardDomainError, NewTask, Placement, Priority, Tag, TagId, Task, TaskEdit, TaskId,
        TaskStatus, TaskTitle, order_after, validate_order,
    },
    ports::{BoardStore, TagRepositoryError, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use thiserror::Error;
use tracing::instrument;

/// Request payload for `task.create`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    priority: Option<Priority>,
    category: Option<String>,
    tag_ids: BTreeSet<TagId>,
}

impl CreateTaskRequest {
    /// Creates a request with only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
            priority: None,
            category: None,
            tag_ids: BTreeSet::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due instant.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the tags to associate.
    #[must_use]
    pub fn with_tags(mut self, tag_ids: impl IntoIterator<Item = TagId>) -> Self {
        self.tag_ids = tag_ids.into_iter().collect();
        self
    }
}

/// Request payload for `task.update`.
///
/// Unset fields are left untouched. Setting `status` or `order` moves the
/// task through the same make-room primitive as `task.reorder`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    id: TaskId,
    title: Option<String>,
    description: Option<String>,
    completed: Option<bool>,
    due_date: Option<DateTime<Utc>>,
    priority: Option<Priority>,
    category: Option<String>,
    tag_ids: Option<BTreeSet<TagId>>,
    status: Option<TaskStatus>,
    order: Option<i64>,
}

impl UpdateTaskRequest {
    /// Creates an update that changes nothing yet.
    #[must_use]
    pub const fn new(id: TaskId) -> Self {
        Self {
            id,
            title: None,
            description: None,
            completed: None,
            due_date: None,
            priority: None,
            category: None,
            tag_ids: None,
            status: None,
            order: None,
        }
    }

    /// Returns the target task.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description. A blank value clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the legacy completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Replaces the due instant.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the category. A blank value clears it.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Replaces the whole tag set.
    #[must_use]
    pub fn with_tags(mut self, tag_ids: impl IntoIterator<Item = TagId>) -> Self {
        self.tag_ids = Some(tag_ids.into_iter().collect());
        self
    }

    /// Moves the task to another column.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Moves the task to an exact position.
    #[must_use]
    pub const fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }
}

/// A task together with its resolved tags, sorted by tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    task: Task,
    tags: Vec<Tag>,
}

impl TaskDetails {
    /// Returns the task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the associated tags.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Splits the value into task and tags.
    #[must_use]
    pub fn into_parts(self) -> (Task, Vec<Tag>) {
        (self.task, self.tags)
    }

    fn resolve(task: Task, index: &HashMap<TagId, Tag>) -> Self {
        let mut tags: Vec<Tag> = task
            .tag_ids()
            .iter()
            .filter_map(|id| index.get(id).cloned())
            .collect();
        tags.sort_by(|left, right| left.name().cmp(right.name()));
        Self { task, tags }
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskBoardError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// Task persistence failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Tag lookup failed.
    #[error(transparent)]
    TagRepository(#[from] TagRepositoryError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// The task belongs to another owner.
    #[error("task {0} is not owned by the caller")]
    Forbidden(TaskId),
    /// A referenced tag does not exist.
    #[error("tag not found: {0}")]
    UnknownTag(TagId),
}

/// Result type for task service operations.
pub type TaskBoardResult<T> = Result<T, TaskBoardError>;

/// Task operations scoped to the calling owner.
#[derive(Clone)]
pub struct TaskBoardService<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> TaskBoardService<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Lists the caller's tasks sorted by status, then order, then creation
    /// time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError`] when the store fails.
    #[instrument(skip_all, fields(owner = %caller.owner()))]
    pub async fn list(&self, caller: &CallerContext) -> TaskBoardResult<Vec<TaskDetails>> {
        let mut tasks = self.store.list_by_owner(caller.owner()).await?;
        tasks.sort_by_key(|task| (task.status(), task.order(), task.created_at()));

        let referenced: BTreeSet<TagId> = tasks
            .iter()
            .flat_map(|task| task.tag_ids().iter().copied())
            .collect();
        let index = self.tag_index(&referenced).await?;

        Ok(tasks
            .into_iter()
            .map(|task| TaskDetails::resolve(task, &index))
            .collect())
    }

    /// Creates a task at the end of the caller's `TODO` column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Domain`] for a blank title and
    /// [`TaskBoardError::UnknownTag`] when a tag id does not exist.
    #[instrument(skip_all, fields(owner = %caller.owner()))]
    pub async fn create(
        &self,
        caller: &CallerContext,
        request: CreateTaskRequest,
    ) -> TaskBoardResult<TaskDetails> {
        let CreateTaskRequest {
            title,
            description,
            due_date,
            priority,
            category,
            tag_ids,
        } = request;

        let new_task = NewTask {
            title: TaskTitle::new(title)?,
            description,
            due_date,
            priority: priority.unwrap_or_default(),
            category,
            tag_ids,
        };
        let index = self.require_tags(&new_task.tag_ids).await?;

        let order = order_after(
            self.store
                .max_order(caller.owner(), TaskStatus::Todo)
                .await?,
        )?;
        let task = Task::create(caller.owner(), new_task, order, &*self.clock)?;
        self.store.store(&task).await?;
        Ok(TaskDetails::resolve(task, &index))
    }

    /// Applies a partial update to one of the caller's tasks.
    ///
    /// A status without an order appends the task to the end of that
    /// column. A status equal to the current one without an order leaves
    /// the position alone.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`] or [`TaskBoardError::Forbidden`]
    /// for a missing or foreign task, and validation errors for bad input.
    #[instrument(skip_all, fields(owner = %caller.owner(), task_id = %request.id()))]
    pub async fn update(
        &self,
        caller: &CallerContext,
        request: UpdateTaskRequest,
    ) -> TaskBoardResult<TaskDetails> {
        let UpdateTaskRequest {
            id,
            title,
            description,
            completed,
            due_date,
            priority,
            category,
            tag_ids,
            status,
            order,
        } = request;

        if let Some(requested) = order {
            validate_order(requested)?;
        }
        let edit = TaskEdit {
            title: title.map(TaskTitle::new).transpose()?,
            description,
            completed,
            due_date,
            priority,
            category,
            tag_ids,
        };

        let mut task = self.owned_task(caller, id).await?;
        if let Some(ids) = &edit.tag_ids {
            self.require_tags(ids).await?;
        }

        let placement = self.requested_placement(&task, status, order).await?;
        task.apply_edit(edit, &*self.clock);
        match placement {
            Some(target) => {
                task.place(target.status, target.order, &*self.clock)?;
                self.store.reposition(&task).await?;
            }
            None => self.store.update(&task).await?,
        }
        self.details(task).await
    }

    /// Deletes one of the caller's tasks with its tag associations.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`] or [`TaskBoardError::Forbidden`]
    /// for a missing or foreign task.
    #[instrument(skip_all, fields(owner = %caller.owner(), task_id = %id))]
    pub async fn delete(&self, caller: &CallerContext, id: TaskId) -> TaskBoardResult<()> {
        self.owned_task(caller, id).await?;
        self.store.delete(id).await?;
        Ok(())
    }

    /// Places one of the caller's tasks at an exact `(status, order)`.
    ///
    /// Every other task of the caller in the target column at or past the
    /// requested order moves one slot down in the same store operation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Domain`] for a negative order, and
    /// [`TaskBoardError::NotFound`] or [`TaskBoardError::Forbidden`] for a
    /// missing or foreign task.
    #[instrument(
        skip_all,
        fields(owner = %caller.owner(), task_id = %id, status = %placement.status, order = placement.order)
    )]
    pub async fn reorder(
        &self,
        caller: &CallerContext,
        id: TaskId,
        placement: Placement,
    ) -> TaskBoardResult<TaskDetails> {
        validate_order(placement.order)?;
        let mut task = self.owned_task(caller, id).await?;
        task.place(placement.status, placement.order, &*self.clock)?;
        self.store.reposition(&task).await?;
        self.details(task).await
    }

    async fn owned_task(&self, caller: &CallerContext, id: TaskId) -> TaskBoardResult<Task> {
        let task = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(TaskBoardError::NotFound(id))?;
        if !task.is_owned_by(caller.owner()) {
            tracing::warn!(task_id = %id, "caller does not own task");
            return Err(TaskBoardError::Forbidden(id));
        }
        Ok(task)
    }

    async fn requested_placement(
        &self,
        task: &Task,
        status: Option<TaskStatus>,
        order: Option<i64>,
    ) -> TaskBoardResult<Option<Placement>> {
        let target_status = status.unwrap_or_else(|| task.status());
        match order {
            Some(exact) => Ok(Some(Placement::new(target_status, exact))),
            None if target_status == task.status() => Ok(None),
            None => {
                let appended =
                    order_after(self.store.max_order(task.owner(), target_status).await?)?;
                Ok(Some(Placement::new(target_status, appended)))
            }
        }
    }

    async fn require_tags(&self, ids: &BTreeSet<TagId>) -> TaskBoardResult<HashMap<TagId, Tag>> {
        let index = self.tag_index(ids).await?;
        if let Some(missing) = ids.iter().find(|id| !index.contains_key(id)) {
            return Err(TaskBoardError::UnknownTag(*missing));
        }
        Ok(index)
    }

    async fn tag_index(&self, ids: &BTreeSet<TagId>) -> TaskBoardResult<HashMap<TagId, Tag>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let lookup: Vec<TagId> = ids.iter().copied().collect();
        let tags = self.store.find_tags(&lookup).await?;
        Ok(tags.into_iter().map(|tag| (tag.id(), tag)).collect())
    }

    async fn details(&self, task: Task) -> TaskBoardResult<TaskDetails> {
        let index = self.tag_index(task.tag_ids()).await?;
        Ok(TaskDetails::resolve(task, &index))
    }
}
