//! HTTP transport — maps requests onto the intake pipeline.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /process` — validate and persist one record. Body = JSON object.
//! - `GET /health` — liveness check returning `{ "ok": true }`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use record_intake::{intake, FileRecordStore};
//!
//! let intake = Arc::new(intake::Intake::new(FileRecordStore::new("/data/received")));
//!
//! // Get the router to compose with other axum routes
//! let app = intake::router(intake.clone());
//!
//! // Or serve directly
//! intake::serve(intake, "0.0.0.0:5000").await?;
//! ```

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tracing::{error, info};

use crate::store::RecordStore;

use super::intake::{Intake, IntakeResponse};

/// Build an axum `Router` that feeds `/process` into the given intake.
///
/// Request bodies are not size-capped, so no record is refused before the
/// pipeline sees it.
pub fn router<S: RecordStore + 'static>(intake: Arc<Intake<S>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/process", post(process_handler::<S>))
        .layer(DefaultBodyLimit::disable())
        .with_state(intake)
}

/// Serve the intake over HTTP at the given address (e.g. `"0.0.0.0:5000"`).
pub async fn serve<S: RecordStore + 'static>(
    intake: Arc<Intake<S>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(intake);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Listening");
    axum::serve(listener, app).await
}

/// `GET /health` — returns `{ "ok": true }`.
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// `POST /process` — the body is read raw so content type and JSON shape are
/// classified by the pipeline rather than by an extractor rejection.
///
/// The file write blocks, so the pipeline runs on the blocking pool.
async fn process_handler<S: RecordStore + 'static>(
    State(intake): State<Arc<Intake<S>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let outcome =
        tokio::task::spawn_blocking(move || intake.handle(content_type.as_deref(), &body)).await;

    match outcome {
        Ok(response) => response.into_response(),
        Err(e) => {
            error!(error = %e, "Intake task did not complete");
            IntakeResponse::internal_error().into_response()
        }
    }
}

impl IntoResponse for IntakeResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body)).into_response()
    }
}
