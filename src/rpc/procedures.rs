//! Procedure names and their typed request and response payloads.
//!
//! Field names are camelCase on the wire. Statuses and priorities travel as
//! `TODO`/`IN_PROGRESS`/`DONE` and `LOW`/`MEDIUM`/`HIGH`, instants as
//! RFC 3339 strings.

use super::error::RpcError;
use crate::board::{
    domain::{
        BoardCard, MovableCard, Placement, Priority, Tag, TagId, TaskId, TaskStatus, due_at_noon,
    },
    services::{CreateTaskRequest, TaskDetails, UpdateTaskRequest},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every procedure exposed by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Procedure {
    /// `task.list`
    TaskList,
    /// `task.create`
    TaskCreate,
    /// `task.update`
    TaskUpdate,
    /// `task.delete`
    TaskDelete,
    /// `task.reorder`
    TaskReorder,
    /// `tag.list`
    TagList,
    /// `tag.create`
    TagCreate,
    /// `tag.update`
    TagUpdate,
    /// `tag.delete`
    TagDelete,
}

impl Procedure {
    /// All procedures in declaration order.
    pub const ALL: [Self; 9] = [
        Self::TaskList,
        Self::TaskCreate,
        Self::TaskUpdate,
        Self::TaskDelete,
        Self::TaskReorder,
        Self::TagList,
        Self::TagCreate,
        Self::TagUpdate,
        Self::TagDelete,
    ];

    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskList => "task.list",
            Self::TaskCreate => "task.create",
            Self::TaskUpdate => "task.update",
            Self::TaskDelete => "task.delete",
            Self::TaskReorder => "task.reorder",
            Self::TagList => "tag.list",
            Self::TagCreate => "tag.create",
            Self::TagUpdate => "tag.update",
            Self::TagDelete => "tag.delete",
        }
    }
}

impl FromStr for Procedure {
    type Err = RpcError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|procedure| procedure.as_str() == value)
            .ok_or_else(|| RpcError::not_found(format!("unknown procedure: {value}")))
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag as returned by tag procedures and embedded in task views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagView {
    /// Tag identifier.
    pub id: TagId,
    /// Tag name.
    pub name: String,
    /// `#RRGGBB` color.
    pub color: String,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last update instant.
    pub updated_at: DateTime<Utc>,
}

impl From<&Tag> for TagView {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id(),
            name: tag.name().as_str().to_owned(),
            color: tag.color().as_str().to_owned(),
            created_at: tag.created_at(),
            updated_at: tag.updated_at(),
        }
    }
}

/// Task as returned by task procedures, with its tags resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    /// Task identifier.
    pub id: TaskId,
    /// Title.
    pub title: String,
    /// Description, if any.
    #[serde(default)]
    pub description: Option<String>,
    /// Due instant, if any.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Priority.
    pub priority: Priority,
    /// Category, if any.
    #[serde(default)]
    pub category: Option<String>,
    /// Legacy completion flag.
    pub completed: bool,
    /// Column.
    pub status: TaskStatus,
    /// Position within the column.
    pub order: i64,
    /// Associated tags sorted by name.
    #[serde(default)]
    pub tags: Vec<TagView>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last update instant.
    pub updated_at: DateTime<Utc>,
}

impl From<TaskDetails> for TaskView {
    fn from(details: TaskDetails) -> Self {
        let (task, tags) = details.into_parts();
        Self {
            id: task.id(),
            title: task.title().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            due_date: task.due_date(),
            priority: task.priority(),
            category: task.category().map(str::to_owned),
            completed: task.completed(),
            status: task.status(),
            order: task.order(),
            tags: tags.iter().map(TagView::from).collect(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

impl BoardCard for TaskView {
    fn card_id(&self) -> TaskId {
        self.id
    }

    fn card_status(&self) -> TaskStatus {
        self.status
    }

    fn card_order(&self) -> i64 {
        self.order
    }
}

impl MovableCard for TaskView {
    fn move_to(&mut self, placement: Placement) {
        self.status = placement.status;
        self.order = placement.order;
    }
}

/// Parses a due date given either as an RFC 3339 instant or as a calendar
/// date. Calendar dates land at 12:00 UTC.
///
/// # Errors
///
/// Returns a validation error for any other shape.
pub fn parse_due_date(raw: &str) -> Result<DateTime<Utc>, RpcError> {
    let trimmed = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| RpcError::validation(format!("invalid due date '{raw}'")))?;
    due_at_noon(date).map_err(|err| RpcError::validation(err.to_string()))
}

/// Input of `task.create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskParams {
    /// Title.
    pub title: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Due date as an RFC 3339 instant or `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Priority, `MEDIUM` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Tags to associate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<TagId>>,
}

impl CreateTaskParams {
    /// Converts into a service request.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed due date.
    pub fn into_request(self) -> Result<CreateTaskRequest, RpcError> {
        let mut request = CreateTaskRequest::new(self.title);
        if let Some(description) = self.description {
            request = request.with_description(description);
        }
        if let Some(raw) = self.due_date {
            request = request.with_due_date(parse_due_date(&raw)?);
        }
        if let Some(priority) = self.priority {
            request = request.with_priority(priority);
        }
        if let Some(category) = self.category {
            request = request.with_category(category);
        }
        if let Some(tag_ids) = self.tag_ids {
            request = request.with_tags(tag_ids);
        }
        Ok(request)
    }
}

/// Input of `task.update`. Absent fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskParams {
    /// Task to update.
    pub id: TaskId,
    /// Replacement title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Replacement description. Blank clears it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement completion flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    /// Replacement due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Target column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// Target position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Replacement tag set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<TagId>>,
    /// Replacement priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Replacement category. Blank clears it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl UpdateTaskParams {
    /// Creates params that change nothing.
    #[must_use]
    pub const fn new(id: TaskId) -> Self {
        Self {
            id,
            title: None,
            description: None,
            completed: None,
            due_date: None,
            status: None,
            order: None,
            tag_ids: None,
            priority: None,
            category: None,
        }
    }

    /// Converts into a service request.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed due date.
    pub fn into_request(self) -> Result<UpdateTaskRequest, RpcError> {
        let mut request = UpdateTaskRequest::new(self.id);
        if let Some(title) = self.title {
            request = request.with_title(title);
        }
        if let Some(description) = self.description {
            request = request.with_description(description);
        }
        if let Some(completed) = self.completed {
            request = request.with_completed(completed);
        }
        if let Some(raw) = self.due_date {
            request = request.with_due_date(parse_due_date(&raw)?);
        }
        if let Some(status) = self.status {
            request = request.with_status(status);
        }
        if let Some(order) = self.order {
            request = request.with_order(order);
        }
        if let Some(tag_ids) = self.tag_ids {
            request = request.with_tags(tag_ids);
        }
        if let Some(priority) = self.priority {
            request = request.with_priority(priority);
        }
        if let Some(category) = self.category {
            request = request.with_category(category);
        }
        Ok(request)
    }
}

/// Input of procedures addressing one record by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdParams<I> {
    /// Record identifier.
    pub id: I,
}

/// Input of `task.reorder`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderTaskParams {
    /// Task to move.
    pub id: TaskId,
    /// Target column.
    pub status: TaskStatus,
    /// Target position.
    pub order: i64,
}

impl ReorderTaskParams {
    /// Returns the requested placement.
    #[must_use]
    pub const fn placement(&self) -> Placement {
        Placement::new(self.status, self.order)
    }
}

/// Input of `tag.create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTagParams {
    /// Tag name.
    pub name: String,
    /// `#RRGGBB` color.
    pub color: String,
}

/// Input of `tag.update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTagParams {
    /// Tag to update.
    pub id: TagId,
    /// New name.
    pub name: String,
    /// New color.
    pub color: String,
}

/// Output of delete procedures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Always `true`.
    pub success: bool,
}

impl SuccessResponse {
    /// Returns the acknowledgement value.
    #[must_use]
    pub const fn ok() -> Self {
        Self { success: true }
    }
}
