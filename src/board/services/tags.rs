//! Tag vocabulary operations.

use super::CallerContext;
use crate::board::{
    domain::{BoardDomainError, Tag, TagColor, TagId, TagName},
    ports::{TagRepository, TagRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::instrument;

/// Service-level errors for tag operations.
#[derive(Debug, Error)]
pub enum TagServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// Tag persistence failed.
    #[error(transparent)]
    Repository(#[from] TagRepositoryError),
    /// The tag does not exist.
    #[error("tag not found: {0}")]
    NotFound(TagId),
}

/// Result type for tag service operations.
pub type TagServiceResult<T> = Result<T, TagServiceError>;

/// Operations on the shared tag vocabulary.
///
/// Tags are not owner-scoped, but every operation still takes the caller so
/// that unauthenticated access is impossible to express.
#[derive(Clone)]
pub struct TagService<R, C>
where
    R: TagRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TagService<R, C>
where
    R: TagRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new tag service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Lists every tag by name.
    ///
    /// # Errors
    ///
    /// Returns [`TagServiceError::Repository`] when the store fails.
    #[instrument(skip_all, fields(owner = %caller.owner()))]
    pub async fn list(&self, caller: &CallerContext) -> TagServiceResult<Vec<Tag>> {
        Ok(self.repository.list_tags().await?)
    }

    /// Creates a tag after validating name and color.
    ///
    /// # Errors
    ///
    /// Returns [`TagServiceError::Domain`] for a blank name or malformed
    /// color.
    #[instrument(skip_all, fields(owner = %caller.owner()))]
    pub async fn create(
        &self,
        caller: &CallerContext,
        name: &str,
        color: &str,
    ) -> TagServiceResult<Tag> {
        let tag = Tag::new(TagName::new(name)?, TagColor::new(color)?, &*self.clock);
        self.repository.store_tag(&tag).await?;
        Ok(tag)
    }

    /// Renames and recolors a tag.
    ///
    /// # Errors
    ///
    /// Returns [`TagServiceError::NotFound`] when the tag does not exist.
    #[instrument(skip_all, fields(owner = %caller.owner(), tag_id = %id))]
    pub async fn update(
        &self,
        caller: &CallerContext,
        id: TagId,
        name: &str,
        color: &str,
    ) -> TagServiceResult<Tag> {
        let name = TagName::new(name)?;
        let color = TagColor::new(color)?;
        let mut tag = self
            .repository
            .find_tag(id)
            .await?
            .ok_or(TagServiceError::NotFound(id))?;
        tag.relabel(name, color, &*self.clock);
        self.repository
            .update_tag(&tag)
            .await
            .map_err(|err| match err {
                TagRepositoryError::NotFound(missing) => TagServiceError::NotFound(missing),
                other => TagServiceError::Repository(other),
            })?;
        Ok(tag)
    }

    /// Deletes a tag and every task association it has.
    ///
    /// # Errors
    ///
    /// Returns [`TagServiceError::NotFound`] when the tag does not exist.
    #[instrument(skip_all, fields(owner = %caller.owner(), tag_id = %id))]
    pub async fn delete(&self, caller: &CallerContext, id: TagId) -> TagServiceResult<()> {
        self.repository.delete_tag(id).await.map_err(|err| match err {
            TagRepositoryError::NotFound(missing) => TagServiceError::NotFound(missing),
            other => TagServiceError::Repository(other),
        })
    }
}
