//! Client bridge for the relay server: mirrors the two HTTP operations and
//! handles the local file plumbing (data-URI encoding on the way in, image
//! download on the way out).

use crate::{relay::ImageData, Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;
use tracing::debug;

const SWAP_FALLBACK: &str = "Failed to generate outfit swap";
const EDIT_FALLBACK: &str = "Failed to edit image";

#[derive(Deserialize)]
struct ImageBody {
    image: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct RelayClient {
    client: reqwest::Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn outfit_swap(&self, target: &ImageData, outfit: &ImageData) -> Result<String> {
        self.post(
            "/api/outfit-swap",
            json!({ "target": target, "outfit": outfit }),
            SWAP_FALLBACK,
        )
        .await
    }

    pub async fn edit_image_with_text(&self, image: &ImageData, prompt: &str) -> Result<String> {
        self.post(
            "/api/edit-image",
            json!({ "image": image, "prompt": prompt }),
            EDIT_FALLBACK,
        )
        .await
    }

    /// One attempt, no retries. Non-2xx statuses surface the server's error
    /// message, or the fallback when the body is not the expected JSON.
    async fn post(&self, path: &str, body: Value, fallback: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_else(|_| fallback.to_string());
            return Err(Error::relay(message));
        }

        let body: ImageBody = response.json().await?;
        Ok(body.image)
    }

    /// Writes a relay result to disk: data URIs are decoded locally, URLs are
    /// fetched first.
    pub async fn save_image(&self, image: &str, path: impl AsRef<Path>) -> Result<()> {
        let bytes = if image.starts_with("data:") {
            let payload = image
                .split_once(',')
                .map(|(_, payload)| payload)
                .ok_or_else(|| Error::validation("Image is not a valid data URI"))?;
            STANDARD
                .decode(payload)
                .map_err(|e| Error::validation(format!("Invalid base64 payload: {e}")))?
        } else {
            self.client
                .get(image)
                .send()
                .await?
                .error_for_status()?
                .bytes()
                .await?
                .to_vec()
        };

        tokio::fs::write(path, bytes).await?;
        Ok(())
    }
}

/// Reads a local file into an [`ImageData`], the counterpart of the browser's
/// FileReader step. The mime type is guessed from the extension.
pub async fn file_to_image_data(path: impl AsRef<Path>) -> Result<ImageData> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let mime_type = mime_for_extension(
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default(),
    );

    Ok(ImageData {
        base64: format!("data:{};base64,{}", mime_type, STANDARD.encode(&bytes)),
        mime_type: mime_type.to_string(),
    })
}

fn mime_for_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}
