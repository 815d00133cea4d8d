//! Backend abstraction for the external text, image and moderation API.
//!
//! The assistant and the moderation gate only see these traits, so tests can
//! swap in [`crate::services::mock::MockBackend`] for the HTTP client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// No API key or base URL configured
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Non-success HTTP status from the API
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Rate limited by upstream API")]
    RateLimited,

    /// Transport failure, including timeouts
    #[error("Network error: {0}")]
    Network(String),

    /// Response body did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// A system + user message pair sent to a chat model.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![Message::system(system), Message::user(user)],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageRequest {
    pub prompt: String,
    pub size: String,
}

/// Fetched image payload, ready to be served as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Run a chat completion and return the first choice's text.
    async fn chat(&self, request: ChatRequest) -> Result<String, LlmError>;

    /// Generate one image and return its URL.
    async fn generate_image(&self, request: ImageRequest) -> Result<String, LlmError>;

    /// Plain GET of a generated image URL.
    async fn fetch_image(&self, url: &str) -> Result<GeneratedImage, LlmError>;
}

#[async_trait]
pub trait Moderator: Send + Sync {
    /// Returns true when the classifier flags `text`.
    async fn is_flagged(&self, text: &str) -> Result<bool, LlmError>;
}
