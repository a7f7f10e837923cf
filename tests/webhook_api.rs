//! End-to-end tests for the webhook HTTP API.
//!
//! Run with: cargo test --test webhook_api
//!
//! Requests go through the full router via `tower::ServiceExt::oneshot`,
//! backed by a SQLite file and a filesystem exporter in a temp directory.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use prost::Message;
use tempfile::TempDir;
use tower::ServiceExt;

use chirpstack_receiver::api::router;
use chirpstack_receiver::config::{StorageConfig, StorageRetryConfig};
use chirpstack_receiver::dispatcher::Dispatcher;
use chirpstack_receiver::export::{FilesystemExporter, NoopExporter};
use chirpstack_receiver::proto::{DeviceInfo, UplinkEvent};
use chirpstack_receiver::storage::{init_storage, MessageStore, MockMessageStore, SqliteMessageStore};

const UPLINK_JSON: &str = r#"{"event":"up","device_info":{"dev_eui":"AA"}, "data":"01020304"}"#;

struct TestApp {
    app: Router,
    store: Arc<SqliteMessageStore>,
    _dir: TempDir,
    export_dir: std::path::PathBuf,
}

async fn test_app() -> TestApp {
    let dir = TempDir::new().unwrap();
    let config = StorageConfig {
        path: dir.path().join("events.sqlite").to_string_lossy().into_owned(),
        max_connections: 2,
        busy_timeout_ms: 0,
        retry: StorageRetryConfig {
            max_retries: 5,
            delay_ms: 10,
        },
    };
    let store = init_storage(&config).await.unwrap();
    let export_dir = dir.path().join("data/json");
    let exporter = Arc::new(FilesystemExporter::new(&export_dir).await.unwrap());

    TestApp {
        app: router(Dispatcher::new(store.clone(), exporter)),
        store,
        _dir: dir,
        export_dir,
    }
}

fn mock_app(store: Arc<MockMessageStore>) -> Router {
    router(Dispatcher::new(store, Arc::new(NoopExporter)))
}

fn post_event(token: Option<&str>, content_type: &str, body: impl Into<Body>) -> Request<Body> {
    let uri = match token {
        Some(token) => format!("/event?event={}", token),
        None => "/event".to_string(),
    };
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(body.into())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, String) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn last_messages(app: &Router, uri: &str) -> Vec<serde_json::Value> {
    let (status, body) = send(app, get(uri)).await;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    serde_json::from_str(&body).unwrap()
}

fn exported_files(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// =============================================================================
// POST /event
// =============================================================================

#[tokio::test]
async fn test_uplink_json_is_stored_exported_and_readable() {
    let t = test_app().await;

    let (status, body) = send(&t.app, post_event(Some("up"), "application/json", UPLINK_JSON)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "up event processed");

    let messages = last_messages(&t.app, "/last-messages?n=1").await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["event_type"], "up");
    assert_eq!(messages[0]["payload"]["deviceInfo"]["devEui"], "AA");
    assert!(messages[0]["received_at"].as_str().unwrap().ends_with('Z'));

    let files = exported_files(&t.export_dir);
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("up_") && files[0].ends_with(".json"));
}

#[tokio::test]
async fn test_binary_uplink() {
    let t = test_app().await;
    let uplink = UplinkEvent {
        device_info: Some(DeviceInfo {
            dev_eui: "0102030405060708".to_string(),
            ..Default::default()
        }),
        f_cnt: 42,
        f_port: 10,
        data: vec![0xde, 0xad, 0xbe, 0xef],
        ..Default::default()
    };

    let (status, body) = send(
        &t.app,
        post_event(Some("up"), "application/octet-stream", uplink.encode_to_vec()),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "body: {}", body);
    let messages = last_messages(&t.app, "/last-messages").await;
    assert_eq!(messages[0]["payload"]["fCnt"], 42);
    assert_eq!(messages[0]["payload"]["data"], "3q2+7w==");
}

#[tokio::test]
async fn test_unsupported_event_type() {
    let t = test_app().await;

    let (status, body) =
        send(&t.app, post_event(Some("bogus"), "application/json", UPLINK_JSON)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Unsupported event type: bogus");
    assert!(last_messages(&t.app, "/last-messages").await.is_empty());
    assert!(exported_files(&t.export_dir).is_empty());
}

#[tokio::test]
async fn test_malformed_binary_join() {
    let t = test_app().await;

    let (status, body) = send(
        &t.app,
        post_event(Some("join"), "application/octet-stream", vec![0xffu8, 0xff, 0xff]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body.starts_with("Failed to parse join event: "),
        "unexpected body: {}",
        body
    );
    assert!(t.store.recent(std::num::NonZeroU32::MIN).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_json() {
    let t = test_app().await;

    let (status, body) =
        send(&t.app, post_event(Some("status"), "application/json", "{\"margin\":")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with("Failed to parse status event: "), "{}", body);
}

#[tokio::test]
async fn test_missing_event_parameter() {
    let t = test_app().await;

    for token in [None, Some("")] {
        let (status, body) = send(&t.app, post_event(token, "application/json", UPLINK_JSON)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Missing 'event' query parameter");
    }
}

#[tokio::test]
async fn test_missing_body() {
    let t = test_app().await;

    let (status, body) = send(&t.app, post_event(Some("up"), "application/json", "")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Missing request body");
}

#[tokio::test]
async fn test_content_type_handling() {
    let t = test_app().await;

    let (status, body) = send(&t.app, post_event(Some("up"), "text/plain", UPLINK_JSON)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid Content-Type");

    let (status, _) = send(
        &t.app,
        post_event(Some("up"), "application/json; charset=utf-8", UPLINK_JSON),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_persistence_failure_still_returns_success() {
    let store = Arc::new(MockMessageStore::new());
    store.set_fail_on_append(true).await;
    let app = mock_app(store.clone());

    let (status, body) = send(&app, post_event(Some("up"), "application/json", UPLINK_JSON)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "up event processed");
    assert!(store.is_empty().await);
}

// =============================================================================
// GET /last-messages
// =============================================================================

#[tokio::test]
async fn test_last_messages_limit_handling() {
    let t = test_app().await;
    for _ in 0..7 {
        send(&t.app, post_event(Some("join"), "application/json", "{}")).await;
    }

    assert_eq!(last_messages(&t.app, "/last-messages").await.len(), 5);
    assert_eq!(last_messages(&t.app, "/last-messages?n=2").await.len(), 2);
    assert_eq!(last_messages(&t.app, "/last-messages?n=abc").await.len(), 5);
    assert_eq!(last_messages(&t.app, "/last-messages?n=100").await.len(), 7);
    assert_eq!(
        last_messages(&t.app, "/last-messages?n=99999999999999999999").await.len(),
        7
    );

    for bad in ["0", "-1", "-99999999999999999999"] {
        let (status, body) = send(&t.app, get(&format!("/last-messages?n={}", bad))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid 'n' query parameter");
    }
}

#[tokio::test]
async fn test_last_messages_storage_failure_is_empty() {
    let store = Arc::new(MockMessageStore::new());
    store.set_fail_on_recent(true).await;
    let app = mock_app(store);

    assert!(last_messages(&app, "/last-messages").await.is_empty());
}

// =============================================================================
// POST /clear
// =============================================================================

#[tokio::test]
async fn test_clear_requires_confirmation() {
    let t = test_app().await;
    send(&t.app, post_event(Some("up"), "application/json", UPLINK_JSON)).await;

    for uri in ["/clear", "/clear?confirm=false", "/clear?confirm=yes"] {
        let (status, body) = send(&t.app, post(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Confirmation required: pass confirm=true");
    }

    assert_eq!(last_messages(&t.app, "/last-messages").await.len(), 1);
}

#[tokio::test]
async fn test_clear_removes_messages_and_exports() {
    let t = test_app().await;
    send(&t.app, post_event(Some("up"), "application/json", UPLINK_JSON)).await;
    send(&t.app, post_event(Some("join"), "application/json", "{}")).await;

    let (status, body) = send(&t.app, post("/clear?confirm=true")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "All messages cleared");
    assert!(last_messages(&t.app, "/last-messages?n=10").await.is_empty());
    assert!(exported_files(&t.export_dir).is_empty());
}

#[tokio::test]
async fn test_clear_store_failure() {
    let store = Arc::new(MockMessageStore::new());
    store.set_fail_on_clear(true).await;
    let app = mock_app(store);

    let (status, body) = send(&app, post("/clear?confirm=true")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Failed to clear messages");
}

// =============================================================================
// GET /health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let t = test_app().await;

    let (status, body) = send(&t.app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}
