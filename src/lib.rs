//! record_intake — HTTP ingestion of user records into a flat-file store.
//!
//! A request body is validated into a [`Record`] and written to
//! `<storage_dir>/user_<id>.json` with an atomic rename, replacing any earlier
//! entry for the same id.

pub mod config;
pub mod intake;
pub mod record;
pub mod store;
pub mod telemetry;

pub use config::{bootstrap_storage, Config, ConfigError};
pub use intake::{Intake, IntakeError, IntakeResponse};
pub use record::{validate, validate_request, Record, RecordId, ValidationError};
pub use store::{write_record, FileRecordStore, InMemoryRecordStore, RecordStore, WriteError};
