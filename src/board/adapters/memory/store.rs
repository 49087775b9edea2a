//! In-memory board store for tests and demo mode.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::board::{
    domain::{OwnerId, Placement, Tag, TagId, Task, TaskId, TaskStatus, make_room},
    ports::{
        TagRepository, TagRepositoryError, TagRepositoryResult, TaskRepository,
        TaskRepositoryError, TaskRepositoryResult,
    },
};

/// Thread-safe in-memory task and tag store.
///
/// Task-tag associations live on the tasks themselves, so deleting a tag
/// detaches it from every task under the same write lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardStore {
    state: Arc<RwLock<InMemoryBoardState>>,
}

#[derive(Debug, Default)]
struct InMemoryBoardState {
    tasks: HashMap<TaskId, Task>,
    tags: HashMap<TagId, Tag>,
}

impl InMemoryBoardStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, InMemoryBoardState>, std::io::Error> {
        self.state
            .read()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, InMemoryBoardState>, std::io::Error> {
        self.state
            .write()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }
}

#[async_trait]
impl TaskRepository for InMemoryBoardStore {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        let slot = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *slot = task.clone();
        Ok(())
    }

    async fn reposition(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }

        let owner = task.owner();
        let placement = Placement::new(task.status(), task.order());
        make_room(
            state.tasks.values_mut().filter(|peer| peer.owner() == owner),
            task.id(),
            placement,
        )
        .map_err(TaskRepositoryError::persistence)?;
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_by_owner(&self, owner: OwnerId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.owner() == owner)
            .cloned()
            .collect())
    }

    async fn max_order(
        &self,
        owner: OwnerId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Option<i64>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.owner() == owner && task.status() == status)
            .map(Task::order)
            .max())
    }
}

#[async_trait]
impl TagRepository for InMemoryBoardStore {
    async fn store_tag(&self, tag: &Tag) -> TagRepositoryResult<()> {
        let mut state = self.write().map_err(TagRepositoryError::persistence)?;
        if state.tags.contains_key(&tag.id()) {
            return Err(TagRepositoryError::DuplicateTag(tag.id()));
        }
        state.tags.insert(tag.id(), tag.clone());
        Ok(())
    }

    async fn update_tag(&self, tag: &Tag) -> TagRepositoryResult<()> {
        let mut state = self.write().map_err(TagRepositoryError::persistence)?;
        let slot = state
            .tags
            .get_mut(&tag.id())
            .ok_or(TagRepositoryError::NotFound(tag.id()))?;
        *slot = tag.clone();
        Ok(())
    }

    async fn delete_tag(&self, id: TagId) -> TagRepositoryResult<()> {
        let mut state = self.write().map_err(TagRepositoryError::persistence)?;
        if !state.tags.contains_key(&id) {
            return Err(TagRepositoryError::NotFound(id));
        }
        for task in state.tasks.values_mut() {
            task.detach_tag(id);
        }
        state.tags.remove(&id);
        Ok(())
    }

    async fn find_tag(&self, id: TagId) -> TagRepositoryResult<Option<Tag>> {
        let state = self.read().map_err(TagRepositoryError::persistence)?;
        Ok(state.tags.get(&id).cloned())
    }

    async fn find_tags(&self, ids: &[TagId]) -> TagRepositoryResult<Vec<Tag>> {
        let state = self.read().map_err(TagRepositoryError::persistence)?;
        Ok(ids
            .iter()
            .filter_map(|id| state.tags.get(id).cloned())
            .collect())
    }

    async fn list_tags(&self) -> TagRepositoryResult<Vec<Tag>> {
        let state = self.read().map_err(TagRepositoryError::persistence)?;
        let mut tags: Vec<Tag> = state.tags.values().cloned().collect();
        tags.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(tags)
    }
}
