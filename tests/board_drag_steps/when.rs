//! When steps for board drag-and-drop scenarios.

use super::world::{BoardWorld, run_async};
use eyre::{WrapErr, eyre};
use rstest_bdd_macros::when;
use serde_json::{Value, json};
use taskboard::board::domain::{DropTarget, TaskStatus};
use taskboard::rpc::TagView;

fn status(raw: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(raw).map_err(|err| eyre!("invalid status in scenario: {err}"))
}

fn drag(world: &mut BoardWorld, title: &str, target: DropTarget) -> Result<(), eyre::Report> {
    let id = world.card(title)?.id;
    world.controller.start_drag(id)?;
    world.controller.drag_over(target)?;
    let outcome = run_async(world.controller.release(Some(target)))?;
    world.last_release = Some(outcome);
    Ok(())
}

#[when(r#"the user drags "{title}" onto the "{column}" column"#)]
fn drag_onto_column(
    world: &mut BoardWorld,
    title: String,
    column: String,
) -> Result<(), eyre::Report> {
    drag(world, &title, DropTarget::Column(status(&column)?))
}

#[when(r#"the user drags "{title}" onto the card "{other}""#)]
fn drag_onto_card(world: &mut BoardWorld, title: String, other: String) -> Result<(), eyre::Report> {
    let target = DropTarget::Task(world.card(&other)?.id);
    drag(world, &title, target)
}

#[when(r#"the tag "{name}" is deleted"#)]
fn tag_is_deleted(world: &mut BoardWorld, name: String) -> Result<(), eyre::Report> {
    let listed = run_async(
        world
            .router
            .dispatch(Some(&world.caller), "tag.list", Value::Null),
    )
    .wrap_err("list tags")?;
    let tags: Vec<TagView> = serde_json::from_value(listed)?;
    let tag = tags
        .iter()
        .find(|tag| tag.name == name)
        .ok_or_else(|| eyre!("no tag named {name:?}"))?;
    run_async(
        world
            .router
            .dispatch(Some(&world.caller), "tag.delete", json!({ "id": tag.id })),
    )
    .wrap_err("delete tag")?;
    Ok(())
}
