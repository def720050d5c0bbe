use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The body of a chat exchange request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The text the user submitted, as it was typed.
    pub message: String,
}

impl ChatRequest {
    /// Creates a request carrying the given message.
    #[inline]
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The body of a successful chat exchange response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    /// The assistant's reply text.
    pub response: String,
    /// Memories the service recalled while answering, if it reports
    /// them. The shape is owned by the service, so it's kept opaque.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_memories: Option<Value>,
}

impl ChatReply {
    /// Creates a reply with the given text and no recalled memories.
    #[inline]
    pub fn new<S: Into<String>>(response: S) -> Self {
        Self {
            response: response.into(),
            related_memories: None,
        }
    }
}

/// The body of a successful dream fetch response.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DreamReply {
    /// Free-form text to display.
    pub dream: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_chat_request_shape() {
        let value = serde_json::to_value(ChatRequest::new("Hello")).unwrap();
        assert_eq!(value, json!({ "message": "Hello" }));
    }

    #[test]
    fn test_chat_reply_with_memories() {
        let reply: ChatReply = serde_json::from_value(json!({
            "response": "Hi there",
            "related_memories": { "documents": [["likes tea"]] }
        }))
        .unwrap();
        assert_eq!(reply.response, "Hi there");
        assert!(reply.related_memories.is_some());
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        assert!(serde_json::from_value::<ChatReply>(json!({})).is_err());
        assert!(
            serde_json::from_value::<ChatReply>(json!({ "response": null }))
                .is_err()
        );
        assert!(
            serde_json::from_value::<DreamReply>(json!({ "detail": "boom" }))
                .is_err()
        );
    }
}
