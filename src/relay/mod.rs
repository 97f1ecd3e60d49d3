use crate::{
    provider::{ChatClient, ChatRequest, Part},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Instruction appended after the two images of a swap request.
const SWAP_INSTRUCTION: &str = "This is a high-fidelity outfit swap task. The first image contains a person. The second image contains a reference outfit. Generate a new version of the first image where the person is wearing the exact outfit from the second image. Maintain the person's pose, identity, and facial expression. The lighting and background should remain consistent and professional. Return only the generated image data.";

/// A user-supplied image: a data URI plus its declared mime type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    pub base64: String,
    pub mime_type: String,
}

impl ImageData {
    /// Extracts the base64 payload, the substring after the first comma of
    /// the data URI. A value without a comma is malformed.
    pub fn payload(&self) -> Result<&str> {
        self.base64
            .split_once(',')
            .map(|(_, payload)| payload)
            .ok_or_else(|| Error::validation("Image is not a valid data URI"))
    }
}

/// Forwards image+instruction payloads to the AI provider and validates the
/// reply. Stateless; every call is one provider round trip, never retried.
pub struct Relay {
    chat: Arc<dyn ChatClient>,
    model: String,
}

impl Relay {
    pub fn new(chat: Arc<dyn ChatClient>, model: impl Into<String>) -> Self {
        Self {
            chat,
            model: model.into(),
        }
    }

    /// Places the outfit from the second image onto the person in the first,
    /// returning the generated image as a data URI or URL.
    pub async fn outfit_swap(&self, target: &ImageData, outfit: &ImageData) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            parts: vec![
                Part::inline(target.payload()?, &target.mime_type),
                Part::inline(outfit.payload()?, &outfit.mime_type),
                Part::text(SWAP_INSTRUCTION),
            ],
        };

        debug!("Dispatching outfit swap request");
        let content = self.chat.chat(request).await?;
        ensure_image(content)
    }

    /// Applies a free-form edit instruction to the image.
    pub async fn edit_image_with_text(&self, image: &ImageData, prompt: &str) -> Result<String> {
        if prompt.is_empty() {
            return Err(Error::validation("Missing image or prompt"));
        }

        let request = ChatRequest {
            model: self.model.clone(),
            parts: vec![
                Part::inline(image.payload()?, &image.mime_type),
                Part::text(edit_instruction(prompt)),
            ],
        };

        debug!("Dispatching image edit request");
        let content = self.chat.chat(request).await?;
        ensure_image(content)
    }
}

fn edit_instruction(prompt: &str) -> String {
    format!(
        "Please edit the provided image based on this instruction: \"{prompt}\". Return only the modified image."
    )
}

/// The boundary guard against providers answering with prose instead of an
/// image: content is accepted only if it starts with "data:image" or "http".
/// This is a heuristic (a markdown-wrapped data URI would be rejected), kept
/// deliberately strict so text is never rendered as an image source.
fn ensure_image(content: String) -> Result<String> {
    if content.starts_with("data:image") || content.starts_with("http") {
        Ok(content)
    } else {
        Err(Error::invalid_output(&content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn png(payload: &str) -> ImageData {
        ImageData {
            base64: format!("data:image/png;base64,{payload}"),
            mime_type: "image/png".to_string(),
        }
    }

    #[test]
    fn payload_is_substring_after_first_comma() {
        assert_eq!(png("AAAA").payload().unwrap(), "AAAA");
    }

    #[test]
    fn payload_keeps_commas_past_the_first() {
        let image = ImageData {
            base64: "data:image/png;base64,AA,BB".to_string(),
            mime_type: "image/png".to_string(),
        };
        assert_eq!(image.payload().unwrap(), "AA,BB");
    }

    #[test]
    fn payload_rejects_value_without_comma() {
        let image = ImageData {
            base64: "not-a-data-uri".to_string(),
            mime_type: "image/png".to_string(),
        };
        let err = image.payload().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn data_image_content_is_accepted_unmodified() {
        let content = "data:image/png;base64,CCCC".to_string();
        assert_eq!(ensure_image(content.clone()).unwrap(), content);
    }

    #[test]
    fn http_url_content_is_accepted() {
        let content = "https://cdn.example/generated.png".to_string();
        assert_eq!(ensure_image(content.clone()).unwrap(), content);
    }

    #[test]
    fn refusal_text_is_rejected_with_snippet() {
        let err = ensure_image("I cannot process this request.".to_string()).unwrap_err();
        assert!(err.to_string().contains("I cannot process this request"));
    }

    #[test]
    fn snippet_is_capped_at_fifty_characters() {
        let long = "x".repeat(200);
        match ensure_image(long).unwrap_err() {
            Error::InvalidOutput { snippet } => assert_eq!(snippet.len(), 50),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn markdown_wrapped_data_uri_is_rejected() {
        // Known fragility of the prefix heuristic, pinned on purpose.
        let err = ensure_image("![img](data:image/png;base64,AA)".to_string()).unwrap_err();
        assert!(matches!(err, Error::InvalidOutput { .. }));
    }

    #[test]
    fn edit_instruction_embeds_prompt_verbatim() {
        let text = edit_instruction("make the sky purple");
        assert!(text.contains("\"make the sky purple\""));
        assert!(text.ends_with("Return only the modified image."));
    }
}
