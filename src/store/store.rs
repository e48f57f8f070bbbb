use std::path::PathBuf;

use crate::record::Record;

use super::error::WriteError;

/// Trait for record persistence. One entry per record id (latest wins).
pub trait RecordStore: Send + Sync {
    /// Save (or fully overwrite) the entry for the record's id.
    ///
    /// Returns the location of the entry.
    fn write(&self, record: &Record) -> Result<PathBuf, WriteError>;
}
