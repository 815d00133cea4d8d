use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use super::llm::{ChatRequest, GenerativeBackend, GeneratedImage, ImageRequest, LlmError};
use super::mood_log::MoodTable;
use crate::config::Config;
use crate::models::care_plan::StressLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Story,
    Mosaic,
    SelfCarePlan,
    MoodAnalysis,
    JournalingPrompt,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Story => "generating story",
            Operation::Mosaic => "generating mosaic",
            Operation::SelfCarePlan => "generating self-care plan",
            Operation::MoodAnalysis => "analyzing mood patterns",
            Operation::JournalingPrompt => "generating journaling prompt",
        };
        f.write_str(s)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("{0} must not be empty")]
    EmptyInput(&'static str),

    #[error("Error {operation}: {source}")]
    Backend {
        operation: Operation,
        #[source]
        source: LlmError,
    },
}

impl AssistantError {
    fn backend(operation: Operation) -> impl FnOnce(LlmError) -> Self {
        move |source| {
            tracing::warn!(operation = %operation, error = %source, "Generative call failed");
            AssistantError::Backend { operation, source }
        }
    }
}

/// The five generative operations. Each one is a single call with no retry
/// and no caching.
#[derive(Clone)]
pub struct GenerativeAssistant {
    backend: Arc<dyn GenerativeBackend>,
    chat_model: String,
    journaling_model: String,
    image_size: String,
}

impl GenerativeAssistant {
    pub fn new(
        backend: Arc<dyn GenerativeBackend>,
        chat_model: impl Into<String>,
        journaling_model: impl Into<String>,
        image_size: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            chat_model: chat_model.into(),
            journaling_model: journaling_model.into(),
            image_size: image_size.into(),
        }
    }

    pub fn from_config(backend: Arc<dyn GenerativeBackend>, config: &Config) -> Self {
        Self::new(
            backend,
            config.chat_model.clone(),
            config.journaling_model.clone(),
            config.image_size.clone(),
        )
    }

    pub async fn generate_story(&self, emotion: &str) -> Result<String, AssistantError> {
        let emotion = non_empty(emotion, "emotion")?;
        let request = ChatRequest::new(
            &self.chat_model,
            "You are a creative storyteller.",
            format!("Write a short story about someone feeling {}.", emotion),
        );
        self.backend
            .chat(request)
            .await
            .map_err(AssistantError::backend(Operation::Story))
    }

    pub async fn generate_mosaic(&self, emotion: &str) -> Result<GeneratedImage, AssistantError> {
        let emotion = non_empty(emotion, "emotion")?;
        let request = ImageRequest {
            prompt: format!(
                "A visual mosaic representing {}. The mosaic should be a collage of images, \
                 colors, and patterns that reflect the emotional state.",
                emotion
            ),
            size: self.image_size.clone(),
        };

        let url = self
            .backend
            .generate_image(request)
            .await
            .map_err(AssistantError::backend(Operation::Mosaic))?;

        self.backend
            .fetch_image(&url)
            .await
            .map_err(AssistantError::backend(Operation::Mosaic))
    }

    pub async fn generate_self_care_plan(
        &self,
        stress_level: StressLevel,
        preferences: &BTreeSet<String>,
    ) -> Result<String, AssistantError> {
        let enjoys = preferences
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let request = ChatRequest::new(
            &self.chat_model,
            "You are a mental health assistant that creates personalized self-care plans.",
            format!(
                "Create a self-care plan for someone with a {} stress level who enjoys {}. \
                 Include mindfulness exercises, study breaks, physical activities, and creative outlets.",
                stress_level, enjoys
            ),
        );
        self.backend
            .chat(request)
            .await
            .map_err(AssistantError::backend(Operation::SelfCarePlan))
    }

    pub async fn analyze_mood_patterns(&self, table: &MoodTable) -> Result<String, AssistantError> {
        let request = ChatRequest::new(
            &self.chat_model,
            "You are a mental health assistant that analyzes mood patterns and provides insights.",
            format!(
                "Analyze the following mood data and provide insights and recommendations: {}",
                table.render()
            ),
        );
        self.backend
            .chat(request)
            .await
            .map_err(AssistantError::backend(Operation::MoodAnalysis))
    }

    pub async fn generate_journaling_prompt(&self) -> Result<String, AssistantError> {
        let request = ChatRequest::new(
            &self.journaling_model,
            "You are a mental health assistant that provides guided journaling prompts.",
            "Generate a journaling prompt to help someone reflect on their feelings and experiences.",
        );
        self.backend
            .chat(request)
            .await
            .map_err(AssistantError::backend(Operation::JournalingPrompt))
    }
}

fn non_empty<'a>(value: &'a str, field: &'static str) -> Result<&'a str, AssistantError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AssistantError::EmptyInput(field));
    }
    Ok(trimmed)
}
