//! intake — the `POST /process` pipeline.
//!
//! [`Intake`] validates a request body and writes the resulting record through
//! a [`RecordStore`](crate::store::RecordStore). Every outcome maps to a fixed
//! status and JSON body:
//!
//! | Outcome | Status | Body |
//! |---|---|---|
//! | non-JSON content type | 400 | `{"error": "Invalid content type"}` |
//! | body not a JSON object | 400 | `{"error": "Invalid JSON payload"}` |
//! | missing required field | 400 | `{"error": "Missing required fields"}` |
//! | write failure | 500 | `{"error": "Internal server error"}` |
//! | success | 200 | `{"status": "ok"}` |
//!
//! ## Example
//!
//! ```
//! use record_intake::intake::Intake;
//! use record_intake::InMemoryRecordStore;
//!
//! let intake = Intake::new(InMemoryRecordStore::new());
//! let response = intake.handle(
//!     Some("application/json"),
//!     br#"{"id": 7, "name": "Ann", "email": "a@x.com"}"#,
//! );
//! assert_eq!(response.status, 200);
//! assert!(intake.store().get("7").is_some());
//! ```

mod error;
mod intake;

pub use error::{IntakeError, INTERNAL_ERROR_MESSAGE};
pub use intake::{Intake, IntakeResponse};

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve};
