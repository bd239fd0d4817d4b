//! Base64+JSON envelope encoding and decoding.

use crate::error::{EnvelopeError, EnvelopeResult};
use crate::response::ResponseEnvelope;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Decodes a raw request body into the typed payload `T`.
///
/// # Errors
///
/// - [`EnvelopeError::EmptyBody`] when the body has zero length
/// - [`EnvelopeError::Base64`] when the body is not valid base64
/// - [`EnvelopeError::Malformed`] when the decoded bytes do not parse as
///   the expected payload shape
pub fn decode<T: DeserializeOwned>(raw: &[u8]) -> EnvelopeResult<T> {
    if raw.is_empty() {
        return Err(EnvelopeError::EmptyBody);
    }
    let decoded = STANDARD.decode(raw)?;
    Ok(serde_json::from_slice(&decoded)?)
}

/// Encodes a response envelope as base64-wrapped JSON.
///
/// This is the wrapping used by every endpoint except the health check;
/// see [`encode_plain`] for the one exception.
pub fn encode(envelope: &ResponseEnvelope, pretty: bool) -> EnvelopeResult<String> {
    Ok(STANDARD.encode(to_json(envelope, pretty)?))
}

/// Encodes a response envelope as plain JSON, without the base64 wrap.
///
/// Only the health-check endpoint answers unwrapped. The asymmetry is a
/// compatibility requirement of the existing wire contract, not an
/// optimization; clients special-case that one endpoint.
pub fn encode_plain(envelope: &ResponseEnvelope, pretty: bool) -> EnvelopeResult<String> {
    to_json(envelope, pretty)
}

/// Encodes any serializable payload as a base64-wrapped JSON body.
///
/// This is the request-side counterpart of [`decode`], used by clients
/// and tests to build wire bodies.
pub fn encode_payload<T: Serialize>(payload: &T, pretty: bool) -> EnvelopeResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(payload)
    } else {
        serde_json::to_string(payload)
    }
    .map_err(EnvelopeError::Serialize)?;
    Ok(STANDARD.encode(json))
}

fn to_json(envelope: &ResponseEnvelope, pretty: bool) -> EnvelopeResult<String> {
    if pretty {
        serde_json::to_string_pretty(envelope)
    } else {
        serde_json::to_string(envelope)
    }
    .map_err(EnvelopeError::Serialize)
}
