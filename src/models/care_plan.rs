use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StressLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StressLevel::Low => "low",
            StressLevel::Medium => "medium",
            StressLevel::High => "high",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfCarePlan {
    pub plan: String,
    pub stress_level: StressLevel,
    pub preferences: BTreeSet<String>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct GeneratePlanRequest {
    pub stress_level: StressLevel,
    #[serde(default)]
    pub preferences: BTreeSet<String>,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub plan: Option<SelfCarePlan>,
}

#[derive(Debug, Deserialize)]
pub struct EmotionRequest {
    #[serde(default)]
    pub emotion: String,
}

#[derive(Debug, Serialize)]
pub struct StoryResponse {
    pub emotion: String,
    pub story: String,
}

#[derive(Debug, Serialize)]
pub struct JournalingPromptResponse {
    pub prompt: String,
}
