//! Request validation: content type, payload shape, required fields.
//!
//! Rules run in order and the first failure wins. Nothing here logs; callers
//! attach logging to the classified error.

use serde_json::Value;

use super::error::ValidationError;
use super::record::{Record, RecordId};

/// Fields every payload must carry with a truthy value.
pub const REQUIRED_FIELDS: [&str; 3] = ["id", "name", "email"];

/// Whether a `Content-Type` header value declares JSON.
///
/// Accepts `application/json` and any `application/*+json`; parameters such as
/// `charset` are ignored.
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    let Some(raw) = content_type else {
        return false;
    };
    let mime = raw.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Validate a raw request: content type first, then the body.
///
/// The body is never parsed when the content type is wrong. A body that is not
/// valid JSON is reported as [`ValidationError::MalformedPayload`].
pub fn validate_request(content_type: Option<&str>, body: &[u8]) -> Result<Record, ValidationError> {
    if !is_json_content_type(content_type) {
        return Err(ValidationError::BadContentType);
    }
    let payload: Value =
        serde_json::from_slice(body).map_err(|_| ValidationError::MalformedPayload)?;
    validate(payload)
}

/// Validate a decoded payload into a [`Record`].
///
/// `0`, `""`, `false`, `null` and empty containers all count as missing; this
/// is truthiness, not a numeric range check, so `{"id": 0}` is rejected.
pub fn validate(payload: Value) -> Result<Record, ValidationError> {
    let Value::Object(object) = payload else {
        return Err(ValidationError::MalformedPayload);
    };

    let all_present = REQUIRED_FIELDS
        .iter()
        .all(|field| object.get(*field).is_some_and(is_truthy));
    if !all_present {
        return Err(ValidationError::MissingFields);
    }

    let id = RecordId::from_value(&object["id"])?;
    Ok(Record::new(id, object))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
