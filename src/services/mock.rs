//! Mock backend for testing.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::llm::{ChatRequest, GenerativeBackend, GeneratedImage, ImageRequest, LlmError, Moderator};

/// Configurable stand-in for the OpenAI client.
pub struct MockBackend {
    response: String,
    flagged: AtomicBool,
    failing: AtomicBool,
    call_count: AtomicU32,
    last_request: Mutex<Option<ChatRequest>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            response: "Mock response".to_string(),
            flagged: AtomicBool::new(false),
            failing: AtomicBool::new(false),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn with_response(mut self, content: impl Into<String>) -> Self {
        self.response = content.into();
        self
    }

    pub fn with_flagged(self, flagged: bool) -> Self {
        self.flagged.store(flagged, Ordering::SeqCst);
        self
    }

    /// Every call fails with `LlmError::Network`.
    pub fn failing(self) -> Self {
        self.failing.store(true, Ordering::SeqCst);
        self
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request.lock().unwrap().clone()
    }

    fn record(&self) -> Result<(), LlmError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(LlmError::Network("connection refused".to_string()));
        }
        Ok(())
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerativeBackend for MockBackend {
    async fn chat(&self, request: ChatRequest) -> Result<String, LlmError> {
        *self.last_request.lock().unwrap() = Some(request);
        self.record()?;
        Ok(self.response.clone())
    }

    async fn generate_image(&self, request: ImageRequest) -> Result<String, LlmError> {
        self.record()?;
        Ok(format!("https://images.test/{}.png", request.size))
    }

    async fn fetch_image(&self, _url: &str) -> Result<GeneratedImage, LlmError> {
        self.record()?;
        Ok(GeneratedImage {
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
            content_type: "image/png".to_string(),
        })
    }
}

#[async_trait]
impl Moderator for MockBackend {
    async fn is_flagged(&self, _text: &str) -> Result<bool, LlmError> {
        self.record()?;
        Ok(self.flagged.load(Ordering::SeqCst))
    }
}
