use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A record could not be persisted.
///
/// Carries the target path and the underlying cause for server-side logs;
/// neither is meant to reach a client.
#[derive(Debug, Error)]
#[error("failed to write {}: {source}", path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl WriteError {
    pub fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}
