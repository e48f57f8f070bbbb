//! Record validation: turns a decoded request body into a [`Record`] or a
//! classified [`ValidationError`].

mod error;
mod record;
mod validate;

pub use error::ValidationError;
pub use record::{Record, RecordId};
pub use validate::{is_json_content_type, validate, validate_request, REQUIRED_FIELDS};
