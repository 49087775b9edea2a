//! `PostgreSQL` store implementation for tasks and tags.

use super::{
    models::{NewTaskRow, TagRow, TaskChangeset, TaskRow, TaskTagRow},
    schema::{tags, task_tags, tasks},
};
use crate::board::{
    domain::{
        OwnerId, PersistedTagData, PersistedTaskData, Priority, Tag, TagColor, TagId, TagName,
        Task, TaskId, TaskStatus, TaskTitle,
    },
    ports::{
        TagRepository, TagRepositoryError, TagRepositoryResult, TaskRepository,
        TaskRepositoryError, TaskRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns the pool error when no connection can be established.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<BoardPgPool, diesel::r2d2::PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().max_size(max_size).build(manager)
}

/// `PostgreSQL`-backed task and tag store.
#[derive(Debug, Clone)]
pub struct PostgresBoardStore {
    pool: BoardPgPool,
}

/// Error types the blocking runner can report pool and join failures in.
trait PersistenceFailure {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self;
}

impl PersistenceFailure for TaskRepositoryError {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl PersistenceFailure for TagRepositoryError {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl PostgresBoardStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: PersistenceFailure + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(E::from_failure)?;
            f(&mut connection)
        })
        .await
        .map_err(E::from_failure)?
    }
}

#[async_trait]
impl TaskRepository for PostgresBoardStore {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);
        let tag_rows = to_tag_rows(task);

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::insert_into(tasks::table)
                        .values(&new_row)
                        .execute(tx)?;
                    insert_tag_rows(tx, &tag_rows)
                })
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(task);
        let tag_rows = to_tag_rows(task);

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    write_task(tx, task_id.into_inner(), &changeset, &tag_rows)
                })
                .map_err(|err| map_task_error(err, task_id))
        })
        .await
    }

    async fn reposition(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let owner = task.owner().into_inner();
        let changeset = to_changeset(task);
        let tag_rows = to_tag_rows(task);

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::update(
                        tasks::table
                            .filter(tasks::owner_id.eq(owner))
                            .filter(tasks::status.eq(&changeset.status))
                            .filter(tasks::position.ge(changeset.position))
                            .filter(tasks::id.ne(task_id.into_inner())),
                    )
                    .set(tasks::position.eq(tasks::position + 1_i64))
                    .execute(tx)?;
                    write_task(tx, task_id.into_inner(), &changeset, &tag_rows)
                })
                .map_err(|err| map_task_error(err, task_id))
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::delete(task_tags::table.filter(task_tags::task_id.eq(id.into_inner())))
                        .execute(tx)?;
                    let deleted = diesel::delete(tasks::table.find(id.into_inner())).execute(tx)?;
                    if deleted == 0 {
                        return Err(DieselError::NotFound);
                    }
                    Ok(())
                })
                .map_err(|err| map_task_error(err, id))
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            let Some(found) = row else {
                return Ok(None);
            };
            let mut tag_index = load_tag_index(connection, &[found.id])
                .map_err(TaskRepositoryError::persistence)?;
            let tag_ids = tag_index.remove(&found.id).unwrap_or_default();
            row_to_task(found, tag_ids).map(Some)
        })
        .await
    }

    async fn list_by_owner(&self, owner: OwnerId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::owner_id.eq(owner.into_inner()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
            let mut tag_index =
                load_tag_index(connection, &ids).map_err(TaskRepositoryError::persistence)?;
            rows.into_iter()
                .map(|row| {
                    let tag_ids = tag_index.remove(&row.id).unwrap_or_default();
                    row_to_task(row, tag_ids)
                })
                .collect()
        })
        .await
    }

    async fn max_order(
        &self,
        owner: OwnerId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Option<i64>> {
        self.run_blocking(move |connection| {
            tasks::table
                .filter(tasks::owner_id.eq(owner.into_inner()))
                .filter(tasks::status.eq(status.as_str()))
                .select(diesel::dsl::max(tasks::position))
                .get_result::<Option<i64>>(connection)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

#[async_trait]
impl TagRepository for PostgresBoardStore {
    async fn store_tag(&self, tag: &Tag) -> TagRepositoryResult<()> {
        let tag_id = tag.id();
        let row = to_tag_row(tag);

        self.run_blocking(move |connection| {
            diesel::insert_into(tags::table)
                .values(&row)
                .execute(connection)
                .map(|_| ())
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TagRepositoryError::DuplicateTag(tag_id)
                    }
                    _ => TagRepositoryError::persistence(err),
                })
        })
        .await
    }

    async fn update_tag(&self, tag: &Tag) -> TagRepositoryResult<()> {
        let tag_id = tag.id();
        let row = to_tag_row(tag);

        self.run_blocking(move |connection| {
            let updated = diesel::update(tags::table.find(row.id))
                .set((
                    tags::name.eq(&row.name),
                    tags::color.eq(&row.color),
                    tags::updated_at.eq(row.updated_at),
                ))
                .execute(connection)
                .map_err(TagRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TagRepositoryError::NotFound(tag_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_tag(&self, id: TagId) -> TagRepositoryResult<()> {
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::delete(task_tags::table.filter(task_tags::tag_id.eq(id.into_inner())))
                        .execute(tx)?;
                    let deleted = diesel::delete(tags::table.find(id.into_inner())).execute(tx)?;
                    if deleted == 0 {
                        return Err(DieselError::NotFound);
                    }
                    Ok(())
                })
                .map_err(|err| match err {
                    DieselError::NotFound => TagRepositoryError::NotFound(id),
                    _ => TagRepositoryError::persistence(err),
                })
        })
        .await
    }

    async fn find_tag(&self, id: TagId) -> TagRepositoryResult<Option<Tag>> {
        self.run_blocking(move |connection| {
            let row = tags::table
                .find(id.into_inner())
                .select(TagRow::as_select())
                .first::<TagRow>(connection)
                .optional()
                .map_err(TagRepositoryError::persistence)?;
            row.map(row_to_tag).transpose()
        })
        .await
    }

    async fn find_tags(&self, ids: &[TagId]) -> TagRepositoryResult<Vec<Tag>> {
        let lookup: Vec<Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            let rows = tags::table
                .filter(tags::id.eq_any(&lookup))
                .select(TagRow::as_select())
                .load::<TagRow>(connection)
                .map_err(TagRepositoryError::persistence)?;
            rows.into_iter().map(row_to_tag).collect()
        })
        .await
    }

    async fn list_tags(&self) -> TagRepositoryResult<Vec<Tag>> {
        self.run_blocking(move |connection| {
            let rows = tags::table
                .order(tags::name.asc())
                .select(TagRow::as_select())
                .load::<TagRow>(connection)
                .map_err(TagRepositoryError::persistence)?;
            rows.into_iter().map(row_to_tag).collect()
        })
        .await
    }
}

/// Updates the task row, then replaces its tag associations.
fn write_task(
    tx: &mut PgConnection,
    id: Uuid,
    changeset: &TaskChangeset,
    tag_rows: &[TaskTagRow],
) -> QueryResult<()> {
    let updated = diesel::update(tasks::table.find(id))
        .set(changeset)
        .execute(tx)?;
    if updated == 0 {
        return Err(DieselError::NotFound);
    }
    diesel::delete(task_tags::table.filter(task_tags::task_id.eq(id))).execute(tx)?;
    insert_tag_rows(tx, tag_rows)
}

fn insert_tag_rows(tx: &mut PgConnection, tag_rows: &[TaskTagRow]) -> QueryResult<()> {
    if tag_rows.is_empty() {
        return Ok(());
    }
    diesel::insert_into(task_tags::table)
        .values(tag_rows)
        .execute(tx)?;
    Ok(())
}

fn map_task_error(err: DieselError, task_id: TaskId) -> TaskRepositoryError {
    match err {
        DieselError::NotFound => TaskRepositoryError::NotFound(task_id),
        _ => TaskRepositoryError::persistence(err),
    }
}

fn load_tag_index(
    connection: &mut PgConnection,
    task_ids: &[Uuid],
) -> QueryResult<HashMap<Uuid, BTreeSet<TagId>>> {
    if task_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = task_tags::table
        .filter(task_tags::task_id.eq_any(task_ids))
        .select(TaskTagRow::as_select())
        .load::<TaskTagRow>(connection)?;

    let mut index: HashMap<Uuid, BTreeSet<TagId>> = HashMap::new();
    for row in rows {
        index
            .entry(row.task_id)
            .or_default()
            .insert(TagId::from_uuid(row.tag_id));
    }
    Ok(index)
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        owner_id: task.owner().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        due_date: task.due_date(),
        priority: task.priority().as_str().to_owned(),
        category: task.category().map(str::to_owned),
        completed: task.completed(),
        status: task.status().as_str().to_owned(),
        position: task.order(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        due_date: task.due_date(),
        priority: task.priority().as_str().to_owned(),
        category: task.category().map(str::to_owned),
        completed: task.completed(),
        status: task.status().as_str().to_owned(),
        position: task.order(),
        updated_at: task.updated_at(),
    }
}

fn to_tag_rows(task: &Task) -> Vec<TaskTagRow> {
    task.tag_ids()
        .iter()
        .map(|tag_id| TaskTagRow {
            task_id: task.id().into_inner(),
            tag_id: tag_id.into_inner(),
        })
        .collect()
}

fn to_tag_row(tag: &Tag) -> TagRow {
    TagRow {
        id: tag.id().into_inner(),
        name: tag.name().as_str().to_owned(),
        color: tag.color().as_str().to_owned(),
        created_at: tag.created_at(),
        updated_at: tag.updated_at(),
    }
}

fn row_to_task(row: TaskRow, tag_ids: BTreeSet<TagId>) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        owner_id,
        title,
        description,
        due_date,
        priority: persisted_priority,
        category,
        completed,
        status: persisted_status,
        position,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        owner: OwnerId::from_uuid(owner_id),
        title: TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?,
        description,
        due_date,
        priority: Priority::try_from(persisted_priority.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        category,
        completed,
        status: TaskStatus::try_from(persisted_status.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        order: position,
        tag_ids,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

fn row_to_tag(row: TagRow) -> TagRepositoryResult<Tag> {
    let data = PersistedTagData {
        id: TagId::from_uuid(row.id),
        name: TagName::new(row.name).map_err(TagRepositoryError::persistence)?,
        color: TagColor::new(row.color).map_err(TagRepositoryError::persistence)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(Tag::from_persisted(data))
}
