//! Behaviour tests for dragging cards across the task board.

#[path = "board_drag_steps/mod.rs"]
mod board_drag_steps_defs;

use board_drag_steps_defs::world::{BoardWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/board_drag.feature",
    name = "Dropping a card on an empty column"
)]
#[tokio::test(flavor = "multi_thread")]
async fn drop_on_empty_column(world: BoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/board_drag.feature",
    name = "Dropping a card on another card takes its position"
)]
#[tokio::test(flavor = "multi_thread")]
async fn drop_on_card_takes_position(world: BoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/board_drag.feature",
    name = "Dropping a card back into its own column changes nothing"
)]
#[tokio::test(flavor = "multi_thread")]
async fn drop_in_same_column_is_cancelled(world: BoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/board_drag.feature",
    name = "A drop the server rejects is rolled back"
)]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_drop_rolls_back(world: BoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/board_drag.feature",
    name = "Deleting a tag detaches it from every task"
)]
#[tokio::test(flavor = "multi_thread")]
async fn tag_deletion_detaches(world: BoardWorld) {
    let _ = world;
}
