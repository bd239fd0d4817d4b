//! The uniform response envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `message` field of a [`ResponseEnvelope`].
///
/// Failure responses carry a short text message; success responses carry
/// an array of result objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    /// A plain text message.
    Text(String),
    /// An array of result records.
    Records(Vec<Value>),
}

/// The wire contract shared by every response: `{response, code, message}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Whether the request succeeded.
    pub response: bool,
    /// The HTTP status code, mirrored into the body.
    pub code: u16,
    /// Result records on success, a short message otherwise.
    pub message: Message,
}

impl ResponseEnvelope {
    /// Builds a 200 envelope carrying result records.
    pub fn success(records: Vec<Value>) -> Self {
        Self {
            response: true,
            code: 200,
            message: Message::Records(records),
        }
    }

    /// Builds a 200 envelope carrying a plain text message.
    pub fn success_text(message: impl Into<String>) -> Self {
        Self {
            response: true,
            code: 200,
            message: Message::Text(message.into()),
        }
    }

    /// Builds a failure envelope with the given code and message.
    pub fn failure(code: u16, message: impl Into<String>) -> Self {
        Self {
            response: false,
            code,
            message: Message::Text(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_serializes_flat() {
        let envelope = ResponseEnvelope::failure(406, "request body empty");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "response": false,
                "code": 406,
                "message": "request body empty"
            })
        );
    }

    #[test]
    fn success_serializes_records() {
        let envelope = ResponseEnvelope::success(vec![serde_json::json!({
            "status": "update merchs success",
            "update": "1 rows updated"
        })]);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["response"], serde_json::json!(true));
        assert_eq!(json["code"], serde_json::json!(200));
        assert!(json["message"].is_array());
    }

    #[test]
    fn message_deserializes_either_form() {
        let text: Message = serde_json::from_str("\"account not seller\"").unwrap();
        assert_eq!(text, Message::Text("account not seller".to_string()));

        let records: Message = serde_json::from_str("[{\"status\":\"ok\"}]").unwrap();
        assert!(matches!(records, Message::Records(ref r) if r.len() == 1));
    }
}
