use serde::{Deserialize, Serialize};

/// One multimodal chat call: ordered parts plus the model identifier.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub parts: Vec<Part>,
}

/// A single part of a multimodal message, serialized in the provider's
/// camelCase schema: `{"inlineData": {...}}` or `{"text": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Part {
    InlineData(InlineData),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub data: String,
    pub mime_type: String,
}

impl Part {
    pub fn inline(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self::InlineData(InlineData {
            data: data.into(),
            mime_type: mime_type.into(),
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// The provider replies with one of two shapes: an object exposing a nested
/// textual content field, or a bare string. Both carry the same content and
/// are treated identically downstream; any other shape fails to decode.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ChatReply {
    Structured { message: Message },
    Plain(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub content: String,
}

impl ChatReply {
    pub fn into_content(self) -> String {
        match self {
            Self::Structured { message } => message.content,
            Self::Plain(content) => content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn inline_part_serializes_in_provider_schema() {
        let part = Part::inline("AAAA", "image/png");
        let value = serde_json::to_value(&part).unwrap();
        assert_eq!(
            value,
            json!({"inlineData": {"data": "AAAA", "mimeType": "image/png"}})
        );
    }

    #[test]
    fn text_part_serializes_in_provider_schema() {
        let part = Part::text("describe this");
        let value = serde_json::to_value(&part).unwrap();
        assert_eq!(value, json!({"text": "describe this"}));
    }

    #[test]
    fn reply_decodes_nested_message_shape() {
        let reply: ChatReply =
            serde_json::from_value(json!({"message": {"content": "data:image/png;base64,CCCC"}}))
                .unwrap();
        assert_eq!(reply.into_content(), "data:image/png;base64,CCCC");
    }

    #[test]
    fn reply_decodes_plain_string_shape() {
        let reply: ChatReply = serde_json::from_value(json!("https://cdn.example/img.png")).unwrap();
        assert_eq!(reply.into_content(), "https://cdn.example/img.png");
    }

    #[test]
    fn reply_rejects_unknown_shape() {
        let result: std::result::Result<ChatReply, _> =
            serde_json::from_value(json!({"candidates": []}));
        assert!(result.is_err());
    }
}
