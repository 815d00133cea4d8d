//! OpenAI HTTP client: chat completions, image generation and moderation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde::{Deserialize, Serialize};

use super::llm::{
    ChatRequest, GenerativeBackend, GeneratedImage, ImageRequest, LlmError, Message, Moderator,
};
use crate::config::Config;

pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, anyhow::Error> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, anyhow::Error> {
        if config.openai_api_key.is_empty() {
            tracing::warn!("OPENAI_API_KEY is not set; generative calls will fail");
        }
        Self::new(
            config.openai_base_url.clone(),
            config.openai_api_key.clone(),
            Duration::from_secs(config.llm_timeout_secs),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response, LlmError> {
        if self.api_key.is_empty() {
            return Err(LlmError::Unavailable("OPENAI_API_KEY is not configured".into()));
        }

        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        check_status(response).await
    }
}

async fn check_status(response: Response) -> Result<Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status.as_u16() == 429 {
        return Err(LlmError::RateLimited);
    }
    let body = response.text().await.unwrap_or_default();
    Err(LlmError::RequestFailed(format!("HTTP {}: {}", status, body)))
}

#[derive(Debug, Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: &'a [Message],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImageBody<'a> {
    prompt: &'a str,
    n: u8,
    size: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

#[derive(Debug, Serialize)]
struct ModerationBody<'a> {
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct ModerationResponse {
    results: Vec<ModerationResult>,
}

#[derive(Debug, Deserialize)]
struct ModerationResult {
    flagged: bool,
}

#[async_trait]
impl GenerativeBackend for OpenAiClient {
    async fn chat(&self, request: ChatRequest) -> Result<String, LlmError> {
        let body = ChatBody {
            model: &request.model,
            messages: &request.messages,
        };
        let response = self.post_json("chat/completions", &body).await?;

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::Parse("No choices in response".into()))?;

        tracing::debug!(model = %request.model, "Chat completion received");
        Ok(choice.message.content.unwrap_or_default())
    }

    async fn generate_image(&self, request: ImageRequest) -> Result<String, LlmError> {
        let body = ImageBody {
            prompt: &request.prompt,
            n: 1,
            size: &request.size,
        };
        let response = self.post_json("images/generations", &body).await?;

        let parsed: ImageResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        parsed
            .data
            .into_iter()
            .next()
            .and_then(|d| d.url)
            .ok_or_else(|| LlmError::Parse("No image URL in response".into()))
    }

    async fn fetch_image(&self, url: &str) -> Result<GeneratedImage, LlmError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;
        let response = check_status(response).await?;

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.starts_with("image/") {
            return Err(LlmError::Parse(format!(
                "Expected an image, got content type '{}'",
                content_type
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;
        if bytes.is_empty() {
            return Err(LlmError::Parse("Empty image body".into()));
        }

        Ok(GeneratedImage {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}

#[async_trait]
impl Moderator for OpenAiClient {
    async fn is_flagged(&self, text: &str) -> Result<bool, LlmError> {
        let response = self
            .post_json("moderations", &ModerationBody { input: text })
            .await?;

        let parsed: ModerationResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        parsed
            .results
            .first()
            .map(|r| r.flagged)
            .ok_or_else(|| LlmError::Parse("No moderation results in response".into()))
    }
}
