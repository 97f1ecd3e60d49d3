use async_trait::async_trait;
use outfit_relay::{
    provider::{ChatClient, ChatRequest},
    Error, Result,
};
use std::sync::{Arc, Mutex};

/// Mock provider for testing: records every request and serves queued
/// replies in order.
pub struct MockChatClient {
    replies: Arc<Mutex<Vec<Result<String>>>>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_reply(self, content: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push(Ok(content.into()));
        self
    }

    pub fn with_error(self, error: Error) -> Self {
        self.replies.lock().unwrap().push(Err(error));
        self
    }

    pub fn get_requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn chat(&self, request: ChatRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request);

        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(Error::provider("No more mock replies available"));
        }

        replies.remove(0)
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}
