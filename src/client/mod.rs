//! Client-side board engine.
//!
//! Holds the task list fetched through the procedure layer, previews drag
//! gestures with the placement engine, and persists drops as optimistic
//! writes that roll back on failure.

mod board;
mod controller;
mod optimistic;
mod port;

pub use board::BoardColumns;
pub use controller::{
    BoardController, ControllerError, DragPhase, Notification, RefreshOutcome, RefreshTicket,
    ReleaseOutcome,
};
pub use optimistic::OptimisticUpdate;
pub use port::{BoardClient, InProcessBoardClient};

#[cfg(test)]
pub(crate) use port::MockBoardClient;

#[cfg(test)]
mod tests;
