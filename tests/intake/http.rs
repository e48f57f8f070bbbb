//! HTTP transport integration tests.
//!
//! Starts an axum server over a temp storage directory and exercises it with reqwest.

use std::path::Path;
use std::sync::Arc;

use record_intake::intake::{self, Intake};
use record_intake::FileRecordStore;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::support::{bulky_user, entries, read_entry};

/// Bind to port 0 and return the base URL with the storage dir it writes to.
async fn start_server() -> (String, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let app = intake::router(Arc::new(Intake::new(FileRecordStore::new(dir.path()))));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), dir)
}

async fn post_json(base: &str, body: &Value) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .post(format!("{base}/process"))
        .json(body)
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

fn assert_empty(dir: &Path) {
    assert!(entries(dir).is_empty(), "expected no entries, found {:?}", entries(dir));
}

#[tokio::test]
async fn health_check() {
    let (base, _dir) = start_server().await;

    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn stores_valid_record() {
    let (base, dir) = start_server().await;
    let payload = json!({ "id": 7, "name": "Ann", "email": "a@x.com" });

    let (status, body) = post_json(&base, &payload).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({ "status": "ok" }));
    assert_eq!(read_entry(dir.path(), "7"), Some(payload));
}

#[tokio::test]
async fn passes_extra_fields_through() {
    let (base, dir) = start_server().await;
    let payload = json!({
        "id": "u-1",
        "name": "Ann",
        "email": "a@x.com",
        "address": { "city": "Lisbon" },
        "tags": ["x", "y"]
    });

    let (status, _) = post_json(&base, &payload).await;

    assert_eq!(status, 200);
    assert_eq!(read_entry(dir.path(), "u-1"), Some(payload));
}

#[tokio::test]
async fn repeated_submission_is_idempotent() {
    let (base, dir) = start_server().await;
    let payload = json!({ "id": 3, "name": "Ann", "email": "a@x.com" });

    assert_eq!(post_json(&base, &payload).await.0, 200);
    let once = std::fs::read(dir.path().join("user_3.json")).unwrap();
    assert_eq!(post_json(&base, &payload).await.0, 200);
    let twice = std::fs::read(dir.path().join("user_3.json")).unwrap();

    assert_eq!(once, twice);
}

#[tokio::test]
async fn same_id_overwrites_previous_entry() {
    let (base, dir) = start_server().await;

    post_json(&base, &json!({ "id": 5, "name": "Old", "email": "old@x.com", "legacy": 1 })).await;
    let latest = json!({ "id": 5, "name": "New", "email": "new@x.com" });
    let (status, _) = post_json(&base, &latest).await;

    assert_eq!(status, 200);
    assert_eq!(read_entry(dir.path(), "5"), Some(latest));
    assert_eq!(entries(dir.path()), ["user_5.json"]);
}

#[tokio::test]
async fn missing_fields_rejected() {
    let (base, dir) = start_server().await;

    for payload in [
        json!({ "name": "Ann" }),
        json!({ "id": 0, "name": "Ann", "email": "a@x.com" }),
        json!({ "id": "", "name": "Ann", "email": "a@x.com" }),
        json!({ "id": 1, "name": null, "email": "a@x.com" }),
        json!({ "id": 1, "name": "Ann", "email": "" }),
    ] {
        let (status, body) = post_json(&base, &payload).await;
        assert_eq!(status, 400, "{payload}");
        assert_eq!(body, json!({ "error": "Missing required fields" }));
    }
    assert_empty(dir.path());
}

#[tokio::test]
async fn rejected_record_leaves_existing_entry_alone() {
    let (base, dir) = start_server().await;
    let original = json!({ "id": 9, "name": "Ann", "email": "a@x.com" });
    post_json(&base, &original).await;

    let (status, _) = post_json(&base, &json!({ "id": 9, "name": "", "email": "b@x.com" })).await;

    assert_eq!(status, 400);
    assert_eq!(read_entry(dir.path(), "9"), Some(original));
}

#[tokio::test]
async fn non_json_content_type_rejected() {
    let (base, dir) = start_server().await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/process"))
        .header("content-type", "text/plain")
        .body(r#"{"id": 1, "name": "Ann", "email": "a@x.com"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Invalid content type" }));
    assert_empty(dir.path());
}

#[tokio::test]
async fn missing_content_type_rejected() {
    let (base, _dir) = start_server().await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/process"))
        .body("{}")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Invalid content type" }));
}

#[tokio::test]
async fn non_object_payload_rejected() {
    let (base, dir) = start_server().await;

    let (status, body) = post_json(&base, &json!([{ "id": 1, "name": "Ann", "email": "a@x.com" }])).await;

    assert_eq!(status, 400);
    assert_eq!(body, json!({ "error": "Invalid JSON payload" }));
    assert_empty(dir.path());
}

#[tokio::test]
async fn unparseable_body_rejected() {
    let (base, _dir) = start_server().await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/process"))
        .header("content-type", "application/json")
        .body(r#"{"id": 1, "name": "#)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Invalid JSON payload" }));
}

#[tokio::test]
async fn path_escaping_id_rejected() {
    let (base, dir) = start_server().await;

    let (status, body) =
        post_json(&base, &json!({ "id": "../outside", "name": "Ann", "email": "a@x.com" })).await;

    assert_eq!(status, 400);
    assert_eq!(body, json!({ "error": "Invalid JSON payload" }));
    assert_empty(dir.path());
}

#[tokio::test]
async fn write_failure_returns_500_without_details() {
    let root = tempfile::tempdir().unwrap();
    let missing = root.path().join("never-created");
    let app = intake::router(Arc::new(Intake::new(FileRecordStore::new(&missing))));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let (status, body) = post_json(
        &format!("http://{addr}"),
        &json!({ "id": 1, "name": "Ann", "email": "a@x.com" }),
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn concurrent_posts_for_same_id_stay_whole() {
    let (base, dir) = start_server().await;
    let first = bulky_user(11, "Ann", 'a');
    let second = bulky_user(11, "Bob", 'b');

    let mut tasks = Vec::new();
    for i in 0..20 {
        let base = base.clone();
        let payload = if i % 2 == 0 { first.clone() } else { second.clone() };
        tasks.push(tokio::spawn(async move { post_json(&base, &payload).await.0 }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), 200);
    }

    let stored = read_entry(dir.path(), "11").unwrap();
    assert!(stored == first || stored == second);
    assert_eq!(entries(dir.path()), ["user_11.json"]);
}

#[tokio::test]
async fn large_record_is_accepted() {
    let (base, dir) = start_server().await;
    let payload = json!({
        "id": 1,
        "name": "Ann",
        "email": "a@x.com",
        "blob": "x".repeat(3 * 1024 * 1024),
    });

    let (status, body) = post_json(&base, &payload).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({ "status": "ok" }));
    assert_eq!(read_entry(dir.path(), "1"), Some(payload));
}

#[tokio::test]
async fn get_on_process_is_not_allowed() {
    let (base, _dir) = start_server().await;

    let resp = reqwest::get(format!("{base}/process")).await.unwrap();

    assert_eq!(resp.status(), 405);
}
