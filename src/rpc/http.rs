//! HTTP binding: `POST /rpc/{procedure}` and `GET /health`.

use super::{
    auth::{Authenticator, bearer_token},
    dispatch::RpcRouter,
    error::RpcError,
    types::RpcResponse,
};
use crate::board::ports::BoardStore;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use mockable::Clock;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared state handed to every handler.
pub struct AppState<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    router: Arc<RpcRouter<S, C>>,
    authenticator: Arc<dyn Authenticator>,
}

impl<S, C> Clone for AppState<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            router: Arc::clone(&self.router),
            authenticator: Arc::clone(&self.authenticator),
        }
    }
}

impl<S, C> AppState<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    /// Creates handler state.
    #[must_use]
    pub fn new(router: Arc<RpcRouter<S, C>>, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            router,
            authenticator,
        }
    }
}

/// Builds the Axum router with all routes.
///
/// `permissive_cors` adds a CORS layer that accepts any origin, for browser
/// clients served from another host during development.
pub fn build_router<S, C>(state: AppState<S, C>, permissive_cors: bool) -> Router
where
    S: BoardStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/rpc/{procedure}", post(rpc_handler::<S, C>))
        .with_state(state)
        .layer(TraceLayer::new_for_http());
    if permissive_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// GET /health
async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// POST /rpc/{procedure}
async fn rpc_handler<S, C>(
    State(state): State<AppState<S, C>>,
    Path(procedure): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    S: BoardStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let caller = match headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
    {
        Some(token) => state.authenticator.authenticate(token).await,
        None => None,
    };

    let outcome = match parse_body(&body) {
        Ok(params) => {
            state
                .router
                .dispatch(caller.as_ref(), &procedure, params)
                .await
        }
        Err(_) if caller.is_none() => Err(RpcError::unauthorized()),
        Err(err) => Err(err),
    };

    match outcome {
        Ok(result) => (StatusCode::OK, Json(RpcResponse::success(result))).into_response(),
        Err(err) => (
            err.kind().status(),
            Json(RpcResponse::failure(err.to_error_body())),
        )
            .into_response(),
    }
}

fn parse_body(body: &[u8]) -> Result<Value, RpcError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|err| RpcError::validation(format!("invalid JSON body: {err}")))
}
