//! Drag-and-drop state machine for the board view.
//!
//! The controller keeps two lists: the canonical list (last known server
//! state, possibly patched by an in-flight optimistic write) and the displayed
//! list (canonical, or a tentative preview while a card is being dragged).

use super::{BoardClient, BoardColumns, OptimisticUpdate};
use crate::board::domain::{DropTarget, Placement, TaskId, placement_for_drop, with_placement};
use crate::rpc::{ReorderTaskParams, RpcError, TaskView};
use thiserror::Error;

/// Current phase of the drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// No gesture in progress.
    Idle,
    /// A card is being dragged.
    Dragging(TaskId),
    /// A drop is being persisted.
    Committing(TaskId),
}

/// User-facing message raised by a failed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    message: String,
}

impl Notification {
    /// Creates an error notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Gesture misuse reported by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    /// A gesture is already in progress.
    #[error("a drag gesture is already in progress")]
    GestureInProgress,
    /// No card is being dragged.
    #[error("no card is being dragged")]
    NotDragging,
    /// The card is not on the board.
    #[error("task {0} is not on the board")]
    UnknownTask(TaskId),
}

/// How a released gesture ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Nothing was persisted and the board reverted.
    Cancelled,
    /// The move was persisted; carries the stored task.
    Committed(TaskView),
    /// The move failed and the board was restored.
    RolledBack,
}

/// Result of completing a list refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The fetched list replaced the board.
    Applied,
    /// A newer refresh or write superseded this one; the result was dropped.
    Stale,
    /// The fetch failed and a notification was raised.
    Failed,
}

/// Proof that a refresh was started, tagged with the generation it belongs
/// to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "pass the ticket to finish_refresh"]
pub struct RefreshTicket {
    generation: u64,
}

#[derive(Debug, Clone)]
struct DragSession {
    task_id: TaskId,
    snapshot: Vec<TaskView>,
}

/// Board view controller driven from a single task.
pub struct BoardController<B: BoardClient> {
    client: B,
    canonical: Vec<TaskView>,
    displayed: Vec<TaskView>,
    session: Option<DragSession>,
    phase: DragPhase,
    generation: u64,
    notifications: Vec<Notification>,
}

impl<B: BoardClient> BoardController<B> {
    /// Creates a controller with an empty board.
    #[must_use]
    pub const fn new(client: B) -> Self {
        Self {
            client,
            canonical: Vec::new(),
            displayed: Vec::new(),
            session: None,
            phase: DragPhase::Idle,
            generation: 0,
            notifications: Vec::new(),
        }
    }

    /// Returns the list currently shown.
    #[must_use]
    pub fn tasks(&self) -> &[TaskView] {
        &self.displayed
    }

    /// Returns the shown list split into columns.
    #[must_use]
    pub fn columns(&self) -> BoardColumns<TaskView> {
        BoardColumns::partition(&self.displayed)
    }

    /// Returns the gesture phase.
    #[must_use]
    pub const fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Returns pending notifications.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Drains pending notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Starts a list refresh. Any refresh started earlier becomes stale.
    pub const fn begin_refresh(&mut self) -> RefreshTicket {
        self.generation += 1;
        RefreshTicket {
            generation: self.generation,
        }
    }

    /// Completes a refresh started with [`Self::begin_refresh`].
    ///
    /// The result is dropped when another refresh or an optimistic write
    /// started after the ticket was issued.
    pub fn finish_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<TaskView>, RpcError>,
    ) -> RefreshOutcome {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "dropping stale task list"
            );
            return RefreshOutcome::Stale;
        }
        match result {
            Ok(tasks) => {
                self.canonical = tasks;
                if self.session.is_none() {
                    self.displayed = self.canonical.clone();
                }
                RefreshOutcome::Applied
            }
            Err(err) => {
                self.notify(&err);
                RefreshOutcome::Failed
            }
        }
    }

    /// Fetches the task list and shows it.
    pub async fn refresh(&mut self) -> RefreshOutcome {
        let ticket = self.begin_refresh();
        let result = self.client.list_tasks().await;
        self.finish_refresh(ticket, result)
    }

    /// Starts dragging `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::GestureInProgress`] unless idle, and
    /// [`ControllerError::UnknownTask`] when the card is not shown.
    pub fn start_drag(&mut self, task_id: TaskId) -> Result<(), ControllerError> {
        if self.phase != DragPhase::Idle {
            return Err(ControllerError::GestureInProgress);
        }
        if !self.displayed.iter().any(|task| task.id == task_id) {
            return Err(ControllerError::UnknownTask(task_id));
        }
        self.session = Some(DragSession {
            task_id,
            snapshot: self.displayed.clone(),
        });
        self.phase = DragPhase::Dragging(task_id);
        Ok(())
    }

    /// Previews dropping the dragged card on `target`.
    ///
    /// Returns the tentative placement, or `None` when the target accepts no
    /// drop; the preview then shows the board as it was at drag start.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::NotDragging`] when no card is dragged.
    pub fn drag_over(&mut self, target: DropTarget) -> Result<Option<Placement>, ControllerError> {
        let session = self.session.as_ref().ok_or(ControllerError::NotDragging)?;
        let placement = placement_for_drop(&session.snapshot, session.task_id, target);
        self.displayed = match placement {
            Some(found) => with_placement(&session.snapshot, session.task_id, found),
            None => session.snapshot.clone(),
        };
        Ok(placement)
    }

    /// Abandons the gesture without persisting anything.
    pub fn cancel_drag(&mut self) {
        if self.session.take().is_some() {
            self.displayed = self.canonical.clone();
            self.phase = DragPhase::Idle;
        }
    }

    /// Ends the gesture over `target`, persisting the move if it has one.
    ///
    /// A successful write is followed by a refresh. A failed write restores
    /// the board exactly as it was before the drop and raises a
    /// notification.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::NotDragging`] when no card is dragged.
    pub async fn release(
        &mut self,
        target: Option<DropTarget>,
    ) -> Result<ReleaseOutcome, ControllerError> {
        let session = self.session.take().ok_or(ControllerError::NotDragging)?;
        let placement =
            target.and_then(|found| placement_for_drop(&session.snapshot, session.task_id, found));
        let Some(placement) = placement else {
            self.displayed = self.canonical.clone();
            self.phase = DragPhase::Idle;
            return Ok(ReleaseOutcome::Cancelled);
        };

        self.phase = DragPhase::Committing(session.task_id);
        self.generation += 1;
        let update = OptimisticUpdate::begin(&self.canonical);
        update.apply(&mut self.canonical, |tasks| {
            with_placement(tasks, session.task_id, placement)
        });
        self.displayed = self.canonical.clone();

        let params = ReorderTaskParams {
            id: session.task_id,
            status: placement.status,
            order: placement.order,
        };
        let outcome = match self.client.reorder_task(params).await {
            Ok(stored) => {
                update.commit();
                self.phase = DragPhase::Idle;
                self.refresh().await;
                ReleaseOutcome::Committed(stored)
            }
            Err(err) => {
                update.rollback(&mut self.canonical);
                self.displayed = self.canonical.clone();
                self.notify(&err);
                self.phase = DragPhase::Idle;
                ReleaseOutcome::RolledBack
            }
        };
        Ok(outcome)
    }

    fn notify(&mut self, err: &RpcError) {
        tracing::warn!(error = %err, "board operation failed");
        self.notifications.push(Notification::error(err.message()));
    }
}
