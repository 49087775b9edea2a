//! Behaviour every board store must share, run against each adapter.
//!
//! Each check uses fresh owners and tags so stores shared between tests do
//! not interfere. Timestamps are not compared because databases may store
//! them at a coarser precision.

use eyre::{ensure, eyre};
use mockable::DefaultClock;
use taskboard::board::{
    domain::{
        NewTask, OwnerId, Tag, TagColor, TagName, Task, TaskEdit, TaskId, TaskStatus, TaskTitle,
    },
    ports::{BoardStore, TagRepositoryError, TaskRepositoryError},
};
use uuid::Uuid;

/// Returns a fresh owner.
pub fn owner() -> OwnerId {
    OwnerId::from_uuid(Uuid::new_v4())
}

/// Builds a `TODO` task at `order`.
pub fn task(owner: OwnerId, title: &str, order: i64) -> Result<Task, eyre::Report> {
    let new_task = NewTask::titled(TaskTitle::new(title)?);
    Ok(Task::create(owner, new_task, order, &DefaultClock)?)
}

/// Builds a tag with a unique name derived from `label`.
pub fn tag(label: &str) -> Result<Tag, eyre::Report> {
    let suffix = Uuid::new_v4().simple().to_string();
    let name = TagName::new(format!("{label}-{}", suffix.get(..8).unwrap_or_default()))?;
    Ok(Tag::new(name, TagColor::new("#00AA55")?, &DefaultClock))
}

async fn order_of<S: BoardStore>(store: &S, id: TaskId) -> Result<(TaskStatus, i64), eyre::Report> {
    let found = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| eyre!("task {id} missing"))?;
    Ok((found.status(), found.order()))
}

/// Storing then finding returns the same task.
pub async fn stored_task_round_trips<S: BoardStore>(store: &S) -> Result<(), eyre::Report> {
    let created = task(owner(), "Round trip", 0)?;
    store.store(&created).await?;

    let found = store
        .find_by_id(created.id())
        .await?
        .ok_or_else(|| eyre!("stored task missing"))?;

    ensure!(found.owner() == created.owner());
    ensure!(found.title() == created.title());
    ensure!((found.status(), found.order()) == (TaskStatus::Todo, 0));
    ensure!(!found.completed());
    ensure!(found.tag_ids().is_empty());
    Ok(())
}

/// Storing the same task twice is rejected.
pub async fn duplicate_task_is_rejected<S: BoardStore>(store: &S) -> Result<(), eyre::Report> {
    let created = task(owner(), "Twice", 0)?;
    store.store(&created).await?;

    let result = store.store(&created).await;

    ensure!(
        matches!(result, Err(TaskRepositoryError::DuplicateTask(id)) if id == created.id()),
        "expected DuplicateTask, got {result:?}"
    );
    Ok(())
}

/// Writes against a missing task report `NotFound`.
pub async fn missing_task_is_not_found<S: BoardStore>(store: &S) -> Result<(), eyre::Report> {
    let ghost = task(owner(), "Ghost", 0)?;

    let updated = store.update(&ghost).await;
    let repositioned = store.reposition(&ghost).await;
    let deleted = store.delete(ghost.id()).await;

    for result in [updated, repositioned, deleted] {
        ensure!(
            matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == ghost.id()),
            "expected NotFound, got {result:?}"
        );
    }
    Ok(())
}

/// Repositioning shifts the owner's peers at or below the slot, and nobody
/// else.
pub async fn reposition_shifts_only_column_peers<S: BoardStore>(
    store: &S,
) -> Result<(), eyre::Report> {
    let alice = owner();
    let bob = owner();
    let first = task(alice, "First", 0)?;
    let second = task(alice, "Second", 1)?;
    let third = task(alice, "Third", 2)?;
    let foreign = task(bob, "Foreign", 1)?;
    for created in [&first, &second, &third, &foreign] {
        store.store(created).await?;
    }

    let mut moved = third.clone();
    moved.place(TaskStatus::Todo, 1, &DefaultClock)?;
    store.reposition(&moved).await?;

    ensure!(order_of(store, first.id()).await? == (TaskStatus::Todo, 0));
    ensure!(order_of(store, third.id()).await? == (TaskStatus::Todo, 1));
    ensure!(order_of(store, second.id()).await? == (TaskStatus::Todo, 2));
    ensure!(order_of(store, foreign.id()).await? == (TaskStatus::Todo, 1));
    Ok(())
}

/// Moving into another column leaves the source column untouched.
pub async fn reposition_into_other_column<S: BoardStore>(store: &S) -> Result<(), eyre::Report> {
    let alice = owner();
    let staying = task(alice, "Staying", 0)?;
    let leaving = task(alice, "Leaving", 1)?;
    store.store(&staying).await?;
    store.store(&leaving).await?;

    let mut moved = leaving.clone();
    moved.place(TaskStatus::InProgress, 0, &DefaultClock)?;
    store.reposition(&moved).await?;

    ensure!(order_of(store, staying.id()).await? == (TaskStatus::Todo, 0));
    ensure!(order_of(store, leaving.id()).await? == (TaskStatus::InProgress, 0));
    ensure!(store.max_order(alice, TaskStatus::InProgress).await? == Some(0));
    ensure!(store.max_order(alice, TaskStatus::Done).await?.is_none());
    Ok(())
}

/// Listing is scoped to one owner.
pub async fn list_is_owner_scoped<S: BoardStore>(store: &S) -> Result<(), eyre::Report> {
    let alice = owner();
    let mine = task(alice, "Mine", 0)?;
    store.store(&mine).await?;
    store.store(&task(owner(), "Theirs", 0)?).await?;

    let listed = store.list_by_owner(alice).await?;

    let ids: Vec<TaskId> = listed.iter().map(Task::id).collect();
    ensure!(ids == vec![mine.id()], "unexpected listing {listed:?}");
    Ok(())
}

/// Updating replaces the tag set; deleting a tag detaches it everywhere.
pub async fn tag_associations_follow_tasks_and_tags<S: BoardStore>(
    store: &S,
) -> Result<(), eyre::Report> {
    let urgent = tag("urgent")?;
    let later = tag("later")?;
    store.store_tag(&urgent).await?;
    store.store_tag(&later).await?;

    let mut tagged = task(owner(), "Tagged", 0)?;
    store.store(&tagged).await?;
    tagged.apply_edit(
        TaskEdit {
            tag_ids: Some([urgent.id(), later.id()].into_iter().collect()),
            ..Default::default()
        },
        &DefaultClock,
    );
    store.update(&tagged).await?;

    store.delete_tag(urgent.id()).await?;

    let found = store
        .find_by_id(tagged.id())
        .await?
        .ok_or_else(|| eyre!("tagged task missing"))?;
    ensure!(
        found.tag_ids().iter().copied().collect::<Vec<_>>() == vec![later.id()],
        "unexpected tags {:?}",
        found.tag_ids()
    );
    ensure!(store.find_tag(urgent.id()).await?.is_none());

    let found_tags = store.find_tags(&[urgent.id(), later.id()]).await?;
    let found_names: Vec<&str> = found_tags.iter().map(|found| found.name().as_str()).collect();
    ensure!(
        found_names == vec![later.name().as_str()],
        "unexpected tags {found_tags:?}"
    );

    let again = store.delete_tag(urgent.id()).await;
    ensure!(
        matches!(again, Err(TagRepositoryError::NotFound(id)) if id == urgent.id()),
        "expected NotFound, got {again:?}"
    );
    Ok(())
}

/// Deleting a task leaves its tags in place.
pub async fn deleting_task_keeps_tags<S: BoardStore>(store: &S) -> Result<(), eyre::Report> {
    let label = tag("keep")?;
    store.store_tag(&label).await?;
    let mut tagged = task(owner(), "Tagged", 0)?;
    store.store(&tagged).await?;
    tagged.apply_edit(
        TaskEdit {
            tag_ids: Some([label.id()].into_iter().collect()),
            ..Default::default()
        },
        &DefaultClock,
    );
    store.update(&tagged).await?;

    store.delete(tagged.id()).await?;

    ensure!(store.find_by_id(tagged.id()).await?.is_none());
    ensure!(store.find_tag(label.id()).await?.is_some());
    Ok(())
}
