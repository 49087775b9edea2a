//! Then steps for board drag-and-drop scenarios.

use super::world::{BoardWorld, run_async};
use eyre::{WrapErr, eyre};
use rstest_bdd_macros::then;
use serde_json::Value;
use taskboard::board::domain::TaskStatus;
use taskboard::client::ReleaseOutcome;
use taskboard::rpc::TaskView;

fn status(raw: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(raw).map_err(|err| eyre!("invalid status in scenario: {err}"))
}

fn column_titles(world: &BoardWorld, column: &str) -> Result<Vec<String>, eyre::Report> {
    Ok(world
        .controller
        .columns()
        .column(status(column)?)
        .iter()
        .map(|task| task.title.clone())
        .collect())
}

fn server_tasks(world: &BoardWorld) -> Result<Vec<TaskView>, eyre::Report> {
    let listed = run_async(
        world
            .router
            .dispatch(Some(&world.caller), "task.list", Value::Null),
    )
    .wrap_err("list tasks")?;
    Ok(serde_json::from_value(listed)?)
}

#[then("the drop is committed")]
fn drop_is_committed(world: &BoardWorld) -> Result<(), eyre::Report> {
    match &world.last_release {
        Some(ReleaseOutcome::Committed(_)) => Ok(()),
        other => Err(eyre!("expected a committed drop, got {other:?}")),
    }
}

#[then("the drop is cancelled")]
fn drop_is_cancelled(world: &BoardWorld) -> Result<(), eyre::Report> {
    match &world.last_release {
        Some(ReleaseOutcome::Cancelled) => Ok(()),
        other => Err(eyre!("expected a cancelled drop, got {other:?}")),
    }
}

#[then("the drop is rolled back")]
fn drop_is_rolled_back(world: &BoardWorld) -> Result<(), eyre::Report> {
    match &world.last_release {
        Some(ReleaseOutcome::RolledBack) => Ok(()),
        other => Err(eyre!("expected a rolled back drop, got {other:?}")),
    }
}

#[then(r#"the "{column}" column shows "{titles}""#)]
fn column_shows(world: &BoardWorld, column: String, titles: String) -> Result<(), eyre::Report> {
    let expected: Vec<String> = titles.split(", ").map(str::to_owned).collect();
    let actual = column_titles(world, &column)?;
    if actual != expected {
        return Err(eyre!("column {column}: expected {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"the "{column}" column is empty"#)]
fn column_is_empty(world: &BoardWorld, column: String) -> Result<(), eyre::Report> {
    let actual = column_titles(world, &column)?;
    if !actual.is_empty() {
        return Err(eyre!("column {column}: expected no cards, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"the server stores "{title}" in "{column}" at order {order}"#)]
fn server_stores(
    world: &BoardWorld,
    title: String,
    column: String,
    order: i64,
) -> Result<(), eyre::Report> {
    let tasks = server_tasks(world)?;
    let task = tasks
        .iter()
        .find(|task| task.title == title)
        .ok_or_else(|| eyre!("server has no task titled {title:?}"))?;
    let expected = status(&column)?;
    if task.status != expected || task.order != order {
        return Err(eyre!(
            "expected {title} at ({}, {order}), found ({}, {})",
            expected.as_str(),
            task.status.as_str(),
            task.order
        ));
    }
    Ok(())
}

#[then(r#"the user is notified "{message}""#)]
fn user_is_notified(world: &BoardWorld, message: String) -> Result<(), eyre::Report> {
    let notes = world.controller.notifications();
    if !notes.iter().any(|note| note.message().starts_with(&message)) {
        return Err(eyre!("no notification starting with {message:?} in {notes:?}"));
    }
    Ok(())
}

#[then(r#"task "{title}" has no tags"#)]
fn task_has_no_tags(world: &BoardWorld, title: String) -> Result<(), eyre::Report> {
    let tasks = server_tasks(world)?;
    let task = tasks
        .iter()
        .find(|task| task.title == title)
        .ok_or_else(|| eyre!("server has no task titled {title:?}"))?;
    if !task.tags.is_empty() {
        return Err(eyre!("expected no tags on {title}, found {:?}", task.tags));
    }
    Ok(())
}
