//! Filesystem storage: one pretty-printed JSON file per record id.
//!
//! Every write goes to a uniquely named temp file in the target directory, is
//! flushed and synced, then renamed over `user_<id>.json`. Readers see either
//! the previous complete document or the new one, never a partial file.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::record::{Record, RecordId};

use super::error::WriteError;
use super::store::RecordStore;

/// Path of the storage entry for `id` under `dir`.
pub fn record_path(dir: &Path, id: &RecordId) -> PathBuf {
    dir.join(id.file_name())
}

/// Persist `record` under `dir`, fully replacing any previous entry for its id.
///
/// `dir` must already exist. Concurrent writers for the same id each rename
/// their own temp file, so the last rename wins and no bytes interleave.
pub fn write_record(dir: &Path, record: &Record) -> Result<PathBuf, WriteError> {
    let path = record_path(dir, record.id());
    let fail = |source| WriteError::new(&path, source);

    let mut builder = tempfile::Builder::new();
    builder.prefix(".user_").suffix(".json.tmp");
    // tempfile defaults to 0600; entries are read by other processes.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }
    let tmp = builder.tempfile_in(dir).map_err(fail)?;
    debug!(tmp = %tmp.path().display(), path = %path.display(), "Writing record");

    let tmp = fill(tmp, record).map_err(fail)?;
    tmp.persist(&path).map_err(|e| fail(e.error))?;
    Ok(path)
}

fn fill(tmp: NamedTempFile, record: &Record) -> std::io::Result<NamedTempFile> {
    let mut writer = BufWriter::new(tmp);
    serde_json::to_writer_pretty(&mut writer, record.payload())?;
    writer.flush()?;
    let tmp = writer.into_inner().map_err(|e| e.into_error())?;
    tmp.as_file().sync_all()?;
    Ok(tmp)
}

/// [`RecordStore`] rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    dir: PathBuf,
}

impl FileRecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl RecordStore for FileRecordStore {
    fn write(&self, record: &Record) -> Result<PathBuf, WriteError> {
        write_record(&self.dir, record)
    }
}
