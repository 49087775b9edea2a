//! JSON procedure dispatch onto the board services.

use super::{
    error::RpcError,
    procedures::{
        CreateTagParams, CreateTaskParams, IdParams, Procedure, ReorderTaskParams,
        SuccessResponse, TagView, TaskView, UpdateTagParams, UpdateTaskParams,
    },
};
use crate::board::{
    domain::{TagId, TaskId},
    ports::BoardStore,
    services::{CallerContext, TagService, TaskBoardService},
};
use mockable::Clock;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

/// Routes procedure calls to the task and tag services.
pub struct RpcRouter<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    tasks: TaskBoardService<S, C>,
    tags: TagService<S, C>,
}

impl<S, C> RpcRouter<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    /// Creates a router over one store and clock.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            tasks: TaskBoardService::new(Arc::clone(&store), Arc::clone(&clock)),
            tags: TagService::new(store, clock),
        }
    }

    /// Dispatches one call.
    ///
    /// `params` is ignored by procedures without input; `Value::Null` is the
    /// usual value for them.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError`] with kind `Unauthorized` when `caller` is `None`,
    /// `NotFound` for an unknown procedure, `Validation` for malformed
    /// params, and the mapped service error otherwise.
    #[instrument(skip(self, caller, params))]
    pub async fn dispatch(
        &self,
        caller: Option<&CallerContext>,
        method: &str,
        params: Value,
    ) -> Result<Value, RpcError> {
        let Some(caller) = caller else {
            tracing::warn!("rejected unauthenticated call");
            return Err(RpcError::unauthorized());
        };
        let procedure: Procedure = method.parse()?;

        match procedure {
            Procedure::TaskList => {
                let tasks = self.tasks.list(caller).await?;
                respond(&tasks.into_iter().map(TaskView::from).collect::<Vec<_>>())
            }
            Procedure::TaskCreate => {
                let request = parse::<CreateTaskParams>(params)?.into_request()?;
                let created = self.tasks.create(caller, request).await?;
                respond(&TaskView::from(created))
            }
            Procedure::TaskUpdate => {
                let request = parse::<UpdateTaskParams>(params)?.into_request()?;
                let updated = self.tasks.update(caller, request).await?;
                respond(&TaskView::from(updated))
            }
            Procedure::TaskDelete => {
                let IdParams { id } = parse::<IdParams<TaskId>>(params)?;
                self.tasks.delete(caller, id).await?;
                respond(&SuccessResponse::ok())
            }
            Procedure::TaskReorder => {
                let reorder = parse::<ReorderTaskParams>(params)?;
                let moved = self
                    .tasks
                    .reorder(caller, reorder.id, reorder.placement())
                    .await?;
                respond(&TaskView::from(moved))
            }
            Procedure::TagList => {
                let tags = self.tags.list(caller).await?;
                respond(&tags.iter().map(TagView::from).collect::<Vec<_>>())
            }
            Procedure::TagCreate => {
                let CreateTagParams { name, color } = parse(params)?;
                let created = self.tags.create(caller, &name, &color).await?;
                respond(&TagView::from(&created))
            }
            Procedure::TagUpdate => {
                let UpdateTagParams { id, name, color } = parse(params)?;
                let updated = self.tags.update(caller, id, &name, &color).await?;
                respond(&TagView::from(&updated))
            }
            Procedure::TagDelete => {
                let IdParams { id } = parse::<IdParams<TagId>>(params)?;
                self.tags.delete(caller, id).await?;
                respond(&SuccessResponse::ok())
            }
        }
    }
}

fn parse<T: DeserializeOwned>(params: Value) -> Result<T, RpcError> {
    serde_json::from_value(params).map_err(|err| RpcError::validation(format!("invalid params: {err}")))
}

fn respond<T: Serialize>(value: &T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|err| RpcError::internal(&err))
}
