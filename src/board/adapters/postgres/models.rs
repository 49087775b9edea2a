//! Diesel row models for board persistence.

use super::schema::{tags, task_tags, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: Uuid,
    /// Owning user identity.
    pub owner_id: Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due instant.
    pub due_date: Option<DateTime<Utc>>,
    /// Priority.
    pub priority: String,
    /// Optional category.
    pub category: Option<String>,
    /// Legacy completion flag.
    pub completed: bool,
    /// Workflow status.
    pub status: String,
    /// Column position.
    pub position: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: Uuid,
    /// Owning user identity.
    pub owner_id: Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due instant.
    pub due_date: Option<DateTime<Utc>>,
    /// Priority.
    pub priority: String,
    /// Optional category.
    pub category: Option<String>,
    /// Legacy completion flag.
    pub completed: bool,
    /// Workflow status.
    pub status: String,
    /// Column position.
    pub position: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Full-row update model for task records.
///
/// `None` writes `NULL` so cleared descriptions and categories persist.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due instant.
    pub due_date: Option<DateTime<Utc>>,
    /// Priority.
    pub priority: String,
    /// Optional category.
    pub category: Option<String>,
    /// Legacy completion flag.
    pub completed: bool,
    /// Workflow status.
    pub status: String,
    /// Column position.
    pub position: i64,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result and insert row for tags.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TagRow {
    /// Tag identifier.
    pub id: Uuid,
    /// Tag name.
    pub name: String,
    /// `#RRGGBB` color.
    pub color: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Task-tag association row.
#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskTagRow {
    /// Associated task.
    pub task_id: Uuid,
    /// Associated tag.
    pub tag_id: Uuid,
}
