use axum::Json;
use serde::Serialize;

use crate::models::mood::Mood;
use crate::services::challenges::CATALOG;

#[derive(Debug, Serialize)]
pub struct Bucket {
    pub label: &'static str,
    pub value: u32,
}

/// Aggregated well-being analytics. The figures are fixed sample data; no
/// session data is aggregated.
#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub sample_data: bool,
    pub mood_distribution_30d: Vec<Bucket>,
    pub popular_activities: Vec<Bucket>,
    pub challenge_completion_rate_pct: Vec<Bucket>,
}

const MOOD_COUNTS: [u32; 7] = [120, 45, 60, 80, 90, 30, 50];
const ACTIVITY_COUNTS: [(&str, u32); 5] = [
    ("Mindfulness", 200),
    ("Physical Activity", 150),
    ("Creative Outlets", 100),
    ("Reading", 80),
    ("Socializing", 120),
];
const CHALLENGE_RATES: [u32; 3] = [70, 50, 40];

pub async fn get_analytics() -> Json<AnalyticsResponse> {
    Json(AnalyticsResponse {
        sample_data: true,
        mood_distribution_30d: Mood::ALL
            .iter()
            .zip(MOOD_COUNTS)
            .map(|(mood, value)| Bucket {
                label: mood.as_str(),
                value,
            })
            .collect(),
        popular_activities: ACTIVITY_COUNTS
            .iter()
            .map(|&(label, value)| Bucket { label, value })
            .collect(),
        challenge_completion_rate_pct: CATALOG
            .iter()
            .zip(CHALLENGE_RATES)
            .map(|(&(name, _), value)| Bucket { label: name, value })
            .collect(),
    })
}
