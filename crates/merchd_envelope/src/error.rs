//! Error types for the envelope codec.

use thiserror::Error;

/// Result type for envelope operations.
pub type EnvelopeResult<T> = Result<T, EnvelopeError>;

/// Errors that can occur while decoding or encoding an envelope.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    /// The request body was empty.
    #[error("request body empty")]
    EmptyBody,

    /// The request body was not valid base64.
    #[error("base64 data decoding failed: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes did not parse as the expected payload shape.
    #[error("malformed envelope: {0}")]
    Malformed(#[from] serde_json::Error),

    /// An envelope could not be serialized.
    #[error("envelope serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl EnvelopeError {
    /// Returns true if this error was caused by client input.
    ///
    /// All decode-side failures are client errors; only [`Self::Serialize`]
    /// originates on the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, EnvelopeError::Serialize(_))
    }
}
