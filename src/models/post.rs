use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ANONYMOUS: &str = "Anonymous";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommunityPost {
    pub name: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RejectReason {
    Empty,
    Flagged,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<CommunityPost>,
}

impl SubmitOutcome {
    pub fn rejected(reason: RejectReason) -> Self {
        Self {
            published: false,
            reason: Some(reason),
            post: None,
        }
    }

    pub fn published(post: CommunityPost) -> Self {
        Self {
            published: true,
            reason: None,
            post: Some(post),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitPostRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<CommunityPost>,
    pub total: usize,
}
