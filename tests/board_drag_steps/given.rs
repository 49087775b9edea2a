//! Given steps for board drag-and-drop scenarios.

use super::world::{BoardWorld, run_async};
use eyre::{WrapErr, eyre};
use rstest_bdd_macros::given;
use serde_json::json;
use taskboard::client::RefreshOutcome;
use taskboard::rpc::TagView;

#[given(r#"a signed-in user with tasks "{first}" and "{second}" in the TODO column"#)]
fn user_with_two_tasks(
    world: &mut BoardWorld,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    for title in [first, second] {
        run_async(world.router.dispatch(
            Some(&world.caller),
            "task.create",
            json!({ "title": title }),
        ))
        .wrap_err("create task for scenario setup")?;
    }
    match run_async(world.controller.refresh()) {
        RefreshOutcome::Applied => Ok(()),
        other => Err(eyre!("initial refresh was not applied: {other:?}")),
    }
}

#[given(r#"task "{title}" has been deleted on the server"#)]
fn task_deleted_on_server(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.card(&title)?.id;
    run_async(
        world
            .router
            .dispatch(Some(&world.caller), "task.delete", json!({ "id": id })),
    )
    .wrap_err("delete task behind the board's back")?;
    Ok(())
}

#[given(r#"task "{title}" is tagged "{tag}""#)]
fn task_is_tagged(world: &mut BoardWorld, title: String, tag: String) -> Result<(), eyre::Report> {
    let created = run_async(world.router.dispatch(
        Some(&world.caller),
        "tag.create",
        json!({ "name": tag, "color": "#FF0000" }),
    ))
    .wrap_err("create tag for scenario setup")?;
    let tag_view: TagView = serde_json::from_value(created)?;
    let id = world.card(&title)?.id;
    run_async(world.router.dispatch(
        Some(&world.caller),
        "task.update",
        json!({ "id": id, "tagIds": [tag_view.id] }),
    ))
    .wrap_err("tag task for scenario setup")?;
    Ok(())
}
