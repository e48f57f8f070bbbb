//! Error type for the request pipeline.

use thiserror::Error;

use crate::record::ValidationError;
use crate::store::WriteError;

/// Terminal failure of a single ingestion request.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// The request was rejected before anything was written.
    #[error(transparent)]
    Rejected(#[from] ValidationError),
    /// The record was valid but could not be persisted.
    #[error(transparent)]
    Failed(#[from] WriteError),
}

/// Body text for every server-side failure. Paths and causes stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

impl IntakeError {
    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            IntakeError::Rejected(_) => 400,
            IntakeError::Failed(_) => 500,
        }
    }

    /// Message safe to show the caller.
    pub fn public_message(&self) -> String {
        match self {
            IntakeError::Rejected(e) => e.to_string(),
            IntakeError::Failed(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}
