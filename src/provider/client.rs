use super::types::{ChatReply, ChatRequest};
use crate::{config::ProviderConfig, Error, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Multimodal chat transport. The relay receives this as an injected
/// dependency so tests can substitute a recording mock.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Sends one chat request and returns the provider's textual content,
    /// whichever reply shape it arrived in.
    async fn chat(&self, request: ChatRequest) -> Result<String>;
}

pub struct HttpChatClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpChatClient {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint,
            api_key: config.api_key,
        })
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    async fn chat(&self, request: ChatRequest) -> Result<String> {
        debug!(
            "Sending chat request with {} parts to model {}",
            request.parts.len(),
            request.model
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::provider(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::provider(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::provider(format!(
                "provider returned {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        debug!("Received chat reply ({} bytes)", body.len());

        // The reply is either a bare JSON string or {"message": {"content": ...}}.
        // Anything else is not an image-bearing reply.
        let reply: ChatReply =
            serde_json::from_str(&body).map_err(|_| Error::invalid_output(&body))?;

        Ok(reply.into_content())
    }
}
