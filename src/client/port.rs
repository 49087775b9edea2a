//! Procedure calls the board controller depends on.

use crate::board::{ports::BoardStore, services::CallerContext};
use crate::rpc::{Procedure, ReorderTaskParams, RpcError, RpcRouter, TaskView};
use async_trait::async_trait;
use mockable::Clock;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Remote procedures used by the board view.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardClient: Send + Sync {
    /// Calls `task.list`.
    async fn list_tasks(&self) -> Result<Vec<TaskView>, RpcError>;

    /// Calls `task.reorder`.
    async fn reorder_task(&self, params: ReorderTaskParams) -> Result<TaskView, RpcError>;
}

/// [`BoardClient`] that dispatches straight into an [`RpcRouter`] as a fixed
/// caller, without a network hop.
pub struct InProcessBoardClient<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    router: Arc<RpcRouter<S, C>>,
    caller: CallerContext,
}

impl<S, C> InProcessBoardClient<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    /// Creates a client acting as `caller`.
    #[must_use]
    pub const fn new(router: Arc<RpcRouter<S, C>>, caller: CallerContext) -> Self {
        Self { router, caller }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        procedure: Procedure,
        params: Value,
    ) -> Result<T, RpcError> {
        let value = self
            .router
            .dispatch(Some(&self.caller), procedure.as_str(), params)
            .await?;
        serde_json::from_value(value).map_err(|err| RpcError::internal(&err))
    }
}

#[async_trait]
impl<S, C> BoardClient for InProcessBoardClient<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    async fn list_tasks(&self) -> Result<Vec<TaskView>, RpcError> {
        self.call(Procedure::TaskList, Value::Null).await
    }

    async fn reorder_task(&self, params: ReorderTaskParams) -> Result<TaskView, RpcError> {
        let payload = serde_json::to_value(params).map_err(|err| RpcError::internal(&err))?;
        self.call(Procedure::TaskReorder, payload).await
    }
}
