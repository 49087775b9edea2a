//! Reordering and status engine for board drag-and-drop.
//!
//! Computes where a dragged card lands for a given drop target, and the
//! make-room shift applied by the store when a task is inserted at an exact
//! column position. The functions are pure: callers decide whether the
//! result is applied tentatively (client) or durably (store).

use super::{BoardDomainError, Task, TaskId, TaskStatus};
use serde::{Deserialize, Serialize};

/// Read access to the fields the engine needs from a board card.
pub trait BoardCard {
    /// Identity of the task shown by the card.
    fn card_id(&self) -> TaskId;
    /// Column the card currently sits in.
    fn card_status(&self) -> TaskStatus;
    /// Position of the card within its column.
    fn card_order(&self) -> i64;
}

/// A card whose position can be rewritten in a local, unpersisted list.
pub trait MovableCard: BoardCard {
    /// Overwrites status and order.
    fn move_to(&mut self, placement: Placement);
}

impl BoardCard for Task {
    fn card_id(&self) -> TaskId {
        self.id()
    }

    fn card_status(&self) -> TaskStatus {
        self.status()
    }

    fn card_order(&self) -> i64 {
        self.order()
    }
}

/// Where a drag gesture was released or is hovering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum DropTarget {
    /// Over one of the three status columns.
    Column(TaskStatus),
    /// Over another task card.
    Task(TaskId),
}

/// A `(status, order)` pair for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Target column.
    pub status: TaskStatus,
    /// Target position within the column.
    pub order: i64,
}

impl Placement {
    /// Creates a placement.
    #[must_use]
    pub const fn new(status: TaskStatus, order: i64) -> Self {
        Self { status, order }
    }
}

/// Returns the order that appends a card to the end of `status`.
///
/// The card identified by `excluding` is ignored, so a card already in the
/// column does not push itself further down. An empty column yields `0`.
pub fn next_order<'a, C, I>(cards: I, status: TaskStatus, excluding: Option<TaskId>) -> i64
where
    C: BoardCard + 'a,
    I: IntoIterator<Item = &'a C>,
{
    cards
        .into_iter()
        .filter(|card| card.card_status() == status)
        .filter(|card| Some(card.card_id()) != excluding)
        .map(BoardCard::card_order)
        .max()
        .map_or(0, |max| max.saturating_add(1))
}

/// Computes the placement for dropping `moved` onto `target`.
///
/// - Column target: the card goes to the end of that column.
/// - Task target in another column: the card takes the target's status and
///   exact order. The store's make-room shift resolves the shared order once
///   persisted.
///
/// Returns `None` when `moved` is not in `cards`, when a task target is
/// missing or is `moved` itself, or when it sits in the same column as
/// `moved`.
pub fn placement_for_drop<C: BoardCard>(
    cards: &[C],
    moved: TaskId,
    target: DropTarget,
) -> Option<Placement> {
    let moved_card = cards.iter().find(|card| card.card_id() == moved)?;
    match target {
        DropTarget::Column(status) => Some(Placement::new(
            status,
            next_order(cards, status, Some(moved)),
        )),
        DropTarget::Task(target_id) => {
            let target_card = cards
                .iter()
                .find(|card| card.card_id() == target_id && target_id != moved)?;
            if target_card.card_status() == moved_card.card_status() {
                return None;
            }
            Some(Placement::new(
                target_card.card_status(),
                target_card.card_order(),
            ))
        }
    }
}

/// Returns a copy of `cards` with `moved` rewritten to `placement`.
#[must_use]
pub fn with_placement<C: MovableCard + Clone>(
    cards: &[C],
    moved: TaskId,
    placement: Placement,
) -> Vec<C> {
    cards
        .iter()
        .cloned()
        .map(|mut card| {
            if card.card_id() == moved {
                card.move_to(placement);
            }
            card
        })
        .collect()
}

/// Shifts every task in `placement.status` at or below `placement.order` one
/// slot down, skipping `moved`.
///
/// Callers pass only the tasks of the moving task's owner. Returns the number
/// of tasks shifted. Nothing moves when any shift would overflow.
///
/// # Errors
///
/// Returns [`BoardDomainError::ColumnFull`] when a peer already sits at the
/// last representable position.
pub fn make_room<'a, I>(
    tasks: I,
    moved: TaskId,
    placement: Placement,
) -> Result<usize, BoardDomainError>
where
    I: IntoIterator<Item = &'a mut Task>,
{
    let mut shifts = Vec::new();
    for task in tasks {
        if task.id() != moved
            && task.status() == placement.status
            && task.order() >= placement.order
        {
            let next = task
                .shifted_order()
                .ok_or(BoardDomainError::ColumnFull(task.order()))?;
            shifts.push((task, next));
        }
    }
    let shifted = shifts.len();
    for (task, next) in shifts {
        task.set_order(next);
    }
    Ok(shifted)
}
