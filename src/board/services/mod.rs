//! Application services for task and tag operations.

mod caller;
mod tags;
mod tasks;

pub use caller::CallerContext;
pub use tags::{TagService, TagServiceError, TagServiceResult};
pub use tasks::{
    CreateTaskRequest, TaskBoardError, TaskBoardResult, TaskBoardService, TaskDetails,
    UpdateTaskRequest,
};
