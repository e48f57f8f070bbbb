use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use super::error::ValidationError;

/// Storage key derived from a record's `id` field.
///
/// String ids are used verbatim, numeric ids by their JSON text. Anything that
/// could name a path outside the storage directory is refused.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Derive a key from the raw `id` value of a payload.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Number(n) => Ok(Self(n.to_string())),
            _ => Err(ValidationError::MalformedPayload),
        }
    }

    /// Accept a textual id, refusing separators and dot segments.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.is_empty() || raw == "." || raw == ".." || raw.contains(['/', '\\', '\0']) {
            return Err(ValidationError::MalformedPayload);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the storage entry for this id: `user_<id>.json`.
    pub fn file_name(&self) -> String {
        format!("user_{}.json", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated user entry: the storage key plus the full submitted object.
///
/// Fields beyond `id`, `name` and `email` ride along untouched, so the stored
/// document is exactly what the client sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    #[serde(skip)]
    id: RecordId,
    payload: Map<String, Value>,
}

impl Record {
    pub(crate) fn new(id: RecordId, payload: Map<String, Value>) -> Self {
        Self { id, payload }
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// The `name` field as submitted.
    pub fn name(&self) -> &Value {
        self.payload.get("name").unwrap_or(&Value::Null)
    }

    /// `name` for log lines: strings bare, anything else as JSON text.
    pub fn display_name(&self) -> Cow<'_, str> {
        match self.name() {
            Value::String(s) => Cow::Borrowed(s),
            other => Cow::Owned(other.to_string()),
        }
    }

    /// The `email` field as submitted.
    pub fn email(&self) -> &Value {
        self.payload.get("email").unwrap_or(&Value::Null)
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    pub fn into_payload(self) -> Map<String, Value> {
        self.payload
    }
}
