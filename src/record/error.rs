use thiserror::Error;

/// Classified reasons a request body is rejected before anything is written.
///
/// The `Display` text doubles as the client-facing error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The request did not declare a JSON content type.
    #[error("Invalid content type")]
    BadContentType,
    /// The body is not a JSON object (or not JSON at all), or its `id` cannot be a storage key.
    #[error("Invalid JSON payload")]
    MalformedPayload,
    /// `id`, `name` or `email` is absent or falsy.
    #[error("Missing required fields")]
    MissingFields,
}
