//! Domain model for the task board.
//!
//! Tasks, tags and the reordering engine live here, free of storage and
//! transport concerns.

mod error;
mod ids;
mod placement;
mod tag;
mod task;

pub use error::{BoardDomainError, ParsePriorityError, ParseTaskStatusError};
pub use ids::{OwnerId, TagId, TaskId};
pub use placement::{
    BoardCard, DropTarget, MovableCard, Placement, make_room, next_order, placement_for_drop,
    with_placement,
};
pub use tag::{PersistedTagData, Tag, TagColor, TagName};
pub use task::{
    MAX_ORDER, NewTask, PersistedTaskData, Priority, Task, TaskEdit, TaskStatus, TaskTitle,
    due_at_noon, order_after, validate_order,
};
