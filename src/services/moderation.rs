use std::str::FromStr;
use std::sync::Arc;

use super::llm::{LlmError, Moderator};

/// What to do when the moderation API itself fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModerationPolicy {
    /// Surface the error; nothing is published.
    #[default]
    FailClosed,
    /// Log and treat the content as unflagged.
    FailOpen,
}

impl FromStr for ModerationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "closed" | "fail_closed" => Ok(Self::FailClosed),
            "open" | "fail_open" => Ok(Self::FailOpen),
            other => Err(format!("unknown moderation policy: {}", other)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Error moderating content: {0}")]
pub struct ModerationError(#[from] pub LlmError);

#[derive(Clone)]
pub struct ModerationGate {
    moderator: Arc<dyn Moderator>,
    policy: ModerationPolicy,
}

impl ModerationGate {
    pub fn new(moderator: Arc<dyn Moderator>, policy: ModerationPolicy) -> Self {
        Self { moderator, policy }
    }

    pub fn policy(&self) -> ModerationPolicy {
        self.policy
    }

    /// Returns the classifier's `flagged` verdict.
    pub async fn check(&self, text: &str) -> Result<bool, ModerationError> {
        match self.moderator.is_flagged(text).await {
            Ok(flagged) => {
                tracing::debug!(flagged, "Moderation verdict");
                Ok(flagged)
            }
            Err(e) => match self.policy {
                ModerationPolicy::FailClosed => {
                    tracing::error!(error = %e, "Moderation unavailable, rejecting content");
                    Err(ModerationError(e))
                }
                ModerationPolicy::FailOpen => {
                    tracing::warn!(error = %e, "Moderation unavailable, treating content as unflagged");
                    Ok(false)
                }
            },
        }
    }
}
