mod client;
mod types;

pub use client::{ChatClient, HttpChatClient};
pub use types::{ChatReply, ChatRequest, InlineData, Message, Part};
