//! Task aggregate root and its workflow enumerations.

use super::{
    BoardDomainError, OwnerId, ParsePriorityError, ParseTaskStatusError, TagId, TaskId,
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Workflow state of a task. Also names the board column the task is shown in.
///
/// Variants are declared in board order, so the derived `Ord` sorts columns
/// left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started.
    Todo,
    /// Being worked on.
    InProgress,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// All statuses in board order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Returns the canonical storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "TODO" => Ok(Self::Todo),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "DONE" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority.
    #[default]
    Medium,
    /// High priority.
    High,
}

impl Priority {
    /// Returns the canonical storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// Validated, trimmed task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTaskTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Largest position a caller may request.
///
/// Tasks can still sit past it after make-room shifts and appends.
pub const MAX_ORDER: i64 = 2_147_483_647;

/// Validates a caller-requested column position.
///
/// # Errors
///
/// Returns [`BoardDomainError::NegativeOrder`] for values below zero and
/// [`BoardDomainError::OrderTooLarge`] above [`MAX_ORDER`].
pub const fn validate_order(order: i64) -> Result<i64, BoardDomainError> {
    if order > MAX_ORDER {
        return Err(BoardDomainError::OrderTooLarge(order));
    }
    non_negative(order)
}

/// Returns the position after `max`, or `0` for an empty column.
///
/// # Errors
///
/// Returns [`BoardDomainError::ColumnFull`] when `max` is the last
/// representable position.
pub fn order_after(max: Option<i64>) -> Result<i64, BoardDomainError> {
    match max {
        None => Ok(0),
        Some(last) => last
            .checked_add(1)
            .ok_or(BoardDomainError::ColumnFull(last)),
    }
}

const fn non_negative(order: i64) -> Result<i64, BoardDomainError> {
    if order < 0 {
        return Err(BoardDomainError::NegativeOrder(order));
    }
    Ok(order)
}

/// Converts a calendar date picked in the edit form into a due instant at
/// 12:00 UTC.
///
/// # Errors
///
/// Returns [`BoardDomainError::InvalidDueDate`] if the date cannot carry a
/// noon timestamp.
pub fn due_at_noon(date: NaiveDate) -> Result<DateTime<Utc>, BoardDomainError> {
    date.and_hms_opt(12, 0, 0)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| BoardDomainError::InvalidDueDate(date.to_string()))
}

/// Blank optional text is stored as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Field values for a task that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title.
    pub title: TaskTitle,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Optional due instant.
    pub due_date: Option<DateTime<Utc>>,
    /// Priority, `MEDIUM` unless chosen.
    pub priority: Priority,
    /// Optional category label.
    pub category: Option<String>,
    /// Tags to associate on creation.
    pub tag_ids: BTreeSet<TagId>,
}

impl NewTask {
    /// Creates creation data with only a title.
    #[must_use]
    pub fn titled(title: TaskTitle) -> Self {
        Self {
            title,
            description: None,
            due_date: None,
            priority: Priority::default(),
            category: None,
            tag_ids: BTreeSet::new(),
        }
    }
}

/// Partial field edit applied by `task.update`.
///
/// `None` leaves a field untouched. Blank `description` or `category` values
/// clear the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement completion flag.
    pub completed: Option<bool>,
    /// Replacement due instant.
    pub due_date: Option<DateTime<Utc>>,
    /// Replacement priority.
    pub priority: Option<Priority>,
    /// Replacement category.
    pub category: Option<String>,
    /// Replacement tag set. Replaces the whole set, never merges.
    pub tag_ids: Option<BTreeSet<TagId>>,
}

impl TaskEdit {
    /// Returns `true` when the edit changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    owner: OwnerId,
    title: TaskTitle,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    priority: Priority,
    category: Option<String>,
    completed: bool,
    status: TaskStatus,
    order: i64,
    tag_ids: BTreeSet<TagId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner identity.
    pub owner: OwnerId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted due instant.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted category.
    pub category: Option<String>,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted column position.
    pub order: i64,
    /// Persisted tag associations.
    pub tag_ids: BTreeSet<TagId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task at the given position of the `TODO` column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::NegativeOrder`] if `order` is negative.
    pub fn create(
        owner: OwnerId,
        new_task: NewTask,
        order: i64,
        clock: &impl Clock,
    ) -> Result<Self, BoardDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            owner,
            title: new_task.title,
            description: non_blank(new_task.description),
            due_date: new_task.due_date,
            priority: new_task.priority,
            category: non_blank(new_task.category),
            completed: false,
            status: TaskStatus::Todo,
            order: non_negative(order)?,
            tag_ids: new_task.tag_ids,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            priority: data.priority,
            category: data.category,
            completed: data.completed,
            status: data.status,
            order: data.order,
            tag_ids: data.tag_ids,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Returns `true` when `owner` owns this task.
    #[must_use]
    pub fn is_owned_by(&self, owner: OwnerId) -> bool {
        self.owner == owner
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due instant, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the category, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns the legacy completion flag.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the position within the status column.
    #[must_use]
    pub const fn order(&self) -> i64 {
        self.order
    }

    /// Returns the associated tag identifiers.
    #[must_use]
    pub const fn tag_ids(&self) -> &BTreeSet<TagId> {
        &self.tag_ids
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial field edit.
    pub fn apply_edit(&mut self, edit: TaskEdit, clock: &impl Clock) {
        let TaskEdit {
            title,
            description,
            completed,
            due_date,
            priority,
            category,
            tag_ids,
        } = edit;

        if let Some(new_title) = title {
            self.title = new_title;
        }
        if description.is_some() {
            self.description = non_blank(description);
        }
        if let Some(flag) = completed {
            self.completed = flag;
        }
        if due_date.is_some() {
            self.due_date = due_date;
        }
        if let Some(new_priority) = priority {
            self.priority = new_priority;
        }
        if category.is_some() {
            self.category = non_blank(category);
        }
        if let Some(ids) = tag_ids {
            self.tag_ids = ids;
        }
        self.touch(clock);
    }

    /// Moves the task to `order` within the `status` column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::NegativeOrder`] if `order` is negative.
    pub fn place(
        &mut self,
        status: TaskStatus,
        order: i64,
        clock: &impl Clock,
    ) -> Result<(), BoardDomainError> {
        self.order = non_negative(order)?;
        self.status = status;
        self.touch(clock);
        Ok(())
    }

    /// Removes a tag association. Returns `true` when the tag was present.
    pub fn detach_tag(&mut self, tag_id: TagId) -> bool {
        self.tag_ids.remove(&tag_id)
    }

    /// Returns the order one slot further down, if representable.
    pub(crate) fn shifted_order(&self) -> Option<i64> {
        self.order.checked_add(1)
    }

    pub(crate) const fn set_order(&mut self, order: i64) {
        self.order = order;
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
