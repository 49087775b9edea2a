//! Column partition of a task list.

use crate::board::domain::{BoardCard, TaskStatus};

/// Cards split into the three status columns, each sorted by order.
///
/// The sort is stable, so cards sharing an order keep their list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumns<C> {
    todo: Vec<C>,
    in_progress: Vec<C>,
    done: Vec<C>,
}

impl<C: BoardCard + Clone> BoardColumns<C> {
    /// Partitions `cards` by status.
    #[must_use]
    pub fn partition(cards: &[C]) -> Self {
        let column = |status: TaskStatus| {
            let mut cards_in: Vec<C> = cards
                .iter()
                .filter(|card| card.card_status() == status)
                .cloned()
                .collect();
            cards_in.sort_by_key(BoardCard::card_order);
            cards_in
        };
        Self {
            todo: column(TaskStatus::Todo),
            in_progress: column(TaskStatus::InProgress),
            done: column(TaskStatus::Done),
        }
    }

    /// Returns the cards of one column.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[C] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    /// Iterates the columns in board order.
    pub fn iter(&self) -> impl Iterator<Item = (TaskStatus, &[C])> {
        TaskStatus::ALL
            .into_iter()
            .map(move |status| (status, self.column(status)))
    }
}
