//! # merchd Envelope
//!
//! Wire envelope codec for merchd.
//!
//! Every non-trivial request and response body on the wire is a base64
//! string wrapping a JSON payload. This crate provides:
//! - Typed request schemas per endpoint, validated at decode time
//! - The uniform `{response, code, message}` response envelope
//! - `decode` / `encode` for the base64+JSON wrap
//!
//! ## Decoding
//!
//! Requests decode straight into their endpoint schema; a body that is
//! empty, not base64, or the wrong shape is rejected here rather than at
//! field-access time.
//!
//! ```
//! use merchd_envelope::{decode, encode_payload, LoginRequest, Credentials};
//!
//! let request = LoginRequest::new(Credentials::new("alice", "secret"));
//! let body = encode_payload(&request, false).unwrap();
//! let decoded: LoginRequest = decode(body.as_bytes()).unwrap();
//! assert_eq!(decoded, request);
//! ```
//!
//! ## The health-check exception
//!
//! Every response except the health check is base64-wrapped
//! ([`encode`]). The health check alone answers plain JSON
//! ([`encode_plain`]); callers parsing responses need to know which
//! wrapping applies to which endpoint.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod codec;
mod error;
mod request;
mod response;

pub use codec::{decode, encode, encode_payload, encode_plain};
pub use error::{EnvelopeError, EnvelopeResult};
pub use request::{Credentials, LoginRequest, PurchaseOrder, PurchaseRequest, UpdateOrder, UpdateRequest};
pub use response::{Message, ResponseEnvelope};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_roundtrip() {
        let request = LoginRequest::new(Credentials::new("alice", "wonderland"));
        let body = encode_payload(&request, false).unwrap();
        let decoded: LoginRequest = decode(body.as_bytes()).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn update_roundtrip() {
        let request = UpdateRequest {
            account: Credentials::new("bob", "builder"),
            update: UpdateOrder {
                merchs_id: 42,
                quantity: 5,
            },
        };
        let body = encode_payload(&request, false).unwrap();
        let decoded: UpdateRequest = decode(body.as_bytes()).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn purchase_roundtrip() {
        let request = PurchaseRequest {
            account: Credentials::new("carol", "buyer"),
            purchase: PurchaseOrder {
                merchs_id: 7,
                purchase_item: "teapot".to_string(),
                seller_id: 3,
                quantity: 2,
            },
        };
        let body = encode_payload(&request, false).unwrap();
        let decoded: PurchaseRequest = decode(body.as_bytes()).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn response_roundtrip() {
        let envelope = ResponseEnvelope::success(vec![serde_json::json!({
            "status": "login success",
            "userId": 1,
            "level": "SELLER",
        })]);
        let body = encode(&envelope, false).unwrap();
        let decoded: ResponseEnvelope = decode(body.as_bytes()).unwrap();
        assert_eq!(decoded, envelope);
    }
}
