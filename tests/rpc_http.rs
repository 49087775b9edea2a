//! HTTP binding tests driving the Axum router with `tower::ServiceExt`.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use taskboard::{
    board::{adapters::memory::InMemoryBoardStore, domain::OwnerId},
    rpc::{AppState, Authenticator, RpcRouter, StaticTokenAuthenticator, build_router},
};
use tower::ServiceExt;
use uuid::Uuid;

const ALICE: &str = "alice-token";
const BOB: &str = "bob-token";

#[fixture]
fn app() -> Router {
    let authenticator: Arc<dyn Authenticator> = Arc::new(StaticTokenAuthenticator::new([
        (ALICE.to_owned(), OwnerId::from_uuid(Uuid::new_v4())),
        (BOB.to_owned(), OwnerId::from_uuid(Uuid::new_v4())),
    ]));
    let router = Arc::new(RpcRouter::new(
        Arc::new(InMemoryBoardStore::new()),
        Arc::new(DefaultClock),
    ));
    build_router(AppState::new(router, authenticator), false)
}

async fn call(app: &Router, procedure: &str, token: Option<&str>, body: &str) -> (StatusCode, Value) {
    let mut request = Request::builder()
        .method("POST")
        .uri(format!("/rpc/{procedure}"))
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let response = app
        .clone()
        .oneshot(request.body(Body::from(body.to_owned())).expect("request"))
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = serde_json::from_slice(&bytes).expect("JSON envelope");
    (status, value)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn health_reports_ok(app: Router) {
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router is infallible");
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value: Value = serde_json::from_slice(&bytes).expect("JSON");
    assert_eq!(value, json!({ "status": "ok" }));
}

#[rstest]
#[case(None)]
#[case(Some("not-a-token"))]
#[tokio::test(flavor = "multi_thread")]
async fn missing_or_unknown_token_is_unauthorized(app: Router, #[case] token: Option<&str>) {
    let (status, body) = call(&app, "task.list", token, "").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("UNAUTHORIZED"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn success_envelope_carries_result(app: Router) {
    let (status, body) = call(&app, "task.create", Some(ALICE), r#"{"title":"Write docs"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["result"]["title"], json!("Write docs"));
    assert_eq!(body["result"]["status"], json!("TODO"));
    assert_eq!(body["result"]["order"], json!(0));
    assert!(body.get("error").is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_title_is_bad_request(app: Router) {
    let (status, body) = call(&app, "task.create", Some(ALICE), r#"{"title":"   "}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("BAD_REQUEST"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_json_is_bad_request(app: Router) {
    let (status, body) = call(&app, "task.create", Some(ALICE), "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_procedure_is_not_found(app: Router) {
    let (status, body) = call(&app, "task.archive", Some(ALICE), "").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], json!("NOT_FOUND"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn foreign_task_is_forbidden(app: Router) {
    let (_, created) = call(&app, "task.create", Some(ALICE), r#"{"title":"Private"}"#).await;
    let id = created["result"]["id"].clone();
    let payload = json!({ "id": id, "status": "DONE", "order": 0 }).to_string();

    let (status, body) = call(&app, "task.reorder", Some(BOB), &payload).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], json!("FORBIDDEN"));

    let (_, listed) = call(&app, "task.list", Some(BOB), "").await;
    assert_eq!(listed["result"], json!([]));
}
