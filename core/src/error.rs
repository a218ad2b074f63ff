//! Error types for the hero API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the server answers 404 for
//! unknown ids. All other non-2xx responses land in `HttpError` with the raw
//! status code and body for debugging. None of these cross the
//! `HeroService` boundary; the service turns them into fallback values.

/// Errors returned by `HeroClient` parse methods and by transports.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404: the requested hero does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned an unexpected status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request never produced a response (connect failure, timeout, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
