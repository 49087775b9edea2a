//! Tags in the shared labelling vocabulary.

use super::{BoardDomainError, TagId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::fmt;

/// Validated, trimmed tag name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TagName(String);

impl TagName {
    /// Creates a validated tag name.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTagName`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTagName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tag color in `#RRGGBB` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TagColor(String);

impl TagColor {
    /// Creates a validated color.
    ///
    /// Hex digits may be upper or lower case; the value is stored as given.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidTagColor`] unless the value is `#`
    /// followed by exactly six hexadecimal digits.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let is_valid = raw
            .strip_prefix('#')
            .is_some_and(|digits| digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()));
        if !is_valid {
            return Err(BoardDomainError::InvalidTagColor(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the color as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named, colored label attachable to many tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    id: TagId,
    name: TagName,
    color: TagColor,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTagData {
    /// Persisted tag identifier.
    pub id: TagId,
    /// Persisted name.
    pub name: TagName,
    /// Persisted color.
    pub color: TagColor,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Tag {
    /// Creates a new tag.
    #[must_use]
    pub fn new(name: TagName, color: TagColor, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TagId::new(),
            name,
            color,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a tag from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTagData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            color: data.color,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the tag identifier.
    #[must_use]
    pub const fn id(&self) -> TagId {
        self.id
    }

    /// Returns the tag name.
    #[must_use]
    pub const fn name(&self) -> &TagName {
        &self.name
    }

    /// Returns the tag color.
    #[must_use]
    pub const fn color(&self) -> &TagColor {
        &self.color
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

    /// Replaces name and color.
    pub fn relabel(&mut self, name: TagName, color: TagColor, clock: &impl Clock) {
        self.name = name;
        self.color = color;
        self.updated_at = clock.utc();
    }
}
