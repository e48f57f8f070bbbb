//! The request pipeline: validate, then persist.
//!
//! `received → validated → persisted`, with an early exit to a rejection
//! (validation failure) or a failure (write error). Nothing is kept between
//! requests except the store itself.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::record::{validate_request, RecordId, ValidationError};
use crate::store::RecordStore;

use super::error::{IntakeError, INTERNAL_ERROR_MESSAGE};

/// Validates inbound payloads and writes them through a [`RecordStore`].
pub struct Intake<S> {
    store: S,
}

impl<S: RecordStore> Intake<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one request through the pipeline.
    ///
    /// Rejections are logged at warn with the offending input, write failures
    /// at error with path and cause.
    pub fn process(&self, content_type: Option<&str>, body: &[u8]) -> Result<RecordId, IntakeError> {
        let record = match validate_request(content_type, body) {
            Ok(record) => record,
            Err(ValidationError::BadContentType) => {
                warn!(content_type = ?content_type, "Request content-type is not application/json");
                return Err(ValidationError::BadContentType.into());
            }
            Err(e) => {
                warn!(error = %e, payload = %String::from_utf8_lossy(body), "Rejected payload");
                return Err(e.into());
            }
        };

        if let Err(e) = self.store.write(&record) {
            error!(path = %e.path.display(), error = %e.source, "Failed to write record");
            return Err(e.into());
        }

        info!(id = %record.id(), name = %record.display_name(), "Processed user");
        Ok(record.id().clone())
    }

    /// Run one request and render the outcome as a status and JSON body.
    pub fn handle(&self, content_type: Option<&str>, body: &[u8]) -> IntakeResponse {
        match self.process(content_type, body) {
            Ok(_) => IntakeResponse::ok(),
            Err(e) => IntakeResponse::from_error(&e),
        }
    }
}

/// Status and JSON body returned for a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntakeResponse {
    pub status: u16,
    pub body: Value,
}

impl IntakeResponse {
    /// `200 {"status": "ok"}`.
    pub fn ok() -> Self {
        Self {
            status: 200,
            body: json!({ "status": "ok" }),
        }
    }

    pub fn from_error(err: &IntakeError) -> Self {
        Self {
            status: err.status_code(),
            body: json!({ "error": err.public_message() }),
        }
    }

    /// `500 {"error": "Internal server error"}` for failures outside the pipeline.
    pub fn internal_error() -> Self {
        Self {
            status: 500,
            body: json!({ "error": INTERNAL_ERROR_MESSAGE }),
        }
    }
}

impl From<IntakeError> for IntakeResponse {
    fn from(err: IntakeError) -> Self {
        Self::from_error(&err)
    }
}
