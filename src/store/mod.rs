//! Record persistence.
//!
//! [`RecordStore`] is the seam the request pipeline writes through;
//! [`FileRecordStore`] is the production implementation and
//! [`InMemoryRecordStore`] backs tests.

mod error;
mod file;
mod in_memory;
mod store;

pub use error::WriteError;
pub use file::{record_path, write_record, FileRecordStore};
pub use in_memory::InMemoryRecordStore;
pub use store::RecordStore;
