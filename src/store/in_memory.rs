use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use serde_json::{Map, Value};

use crate::record::Record;

use super::error::WriteError;
use super::store::RecordStore;

/// In-memory record store backed by `Arc<RwLock<HashMap>>`.
///
/// Clone-friendly (cloning shares the same underlying storage). Entries are
/// keyed by the file name the filesystem store would use.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    storage: Arc<RwLock<HashMap<String, Map<String, Value>>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored payload for a record id, if any.
    pub fn get(&self, id: &str) -> Option<Map<String, Value>> {
        let storage = self.storage.read().ok()?;
        storage.get(&format!("user_{id}.json")).cloned()
    }

    pub fn len(&self) -> usize {
        self.storage.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordStore for InMemoryRecordStore {
    fn write(&self, record: &Record) -> Result<PathBuf, WriteError> {
        let key = record.id().file_name();
        let mut storage = self.storage.write().map_err(|_| {
            WriteError::new(&key, io::Error::other("record store lock poisoned"))
        })?;
        storage.insert(key.clone(), record.payload().clone());
        Ok(PathBuf::from(key))
    }
}
