use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Mood {
    Happy,
    Sad,
    Anxious,
    Stressed,
    Calm,
    Angry,
    Tired,
}

impl Mood {
    pub const ALL: [Mood; 7] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Anxious,
        Mood::Stressed,
        Mood::Calm,
        Mood::Angry,
        Mood::Tired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Anxious => "Anxious",
            Mood::Stressed => "Stressed",
            Mood::Calm => "Calm",
            Mood::Angry => "Angry",
            Mood::Tired => "Tired",
        }
    }
}

/// One logged mood. Persisted as `{"date": "YYYY-MM-DD", "mood": "Happy"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodEntry {
    pub date: NaiveDate,
    pub mood: Mood,
}

#[derive(Debug, Deserialize)]
pub struct LogMoodRequest {
    pub mood: Mood,
}

#[derive(Debug, Serialize)]
pub struct MoodListResponse {
    pub entries: Vec<MoodEntry>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MoodTableResponse {
    NoData { message: String },
    Table { rows: Vec<MoodEntry>, rendered: String },
}

#[derive(Debug, Serialize)]
pub struct PersistResponse {
    pub path: String,
    pub entries: usize,
}

#[derive(Debug, Serialize)]
pub struct MoodAnalysisResponse {
    pub insights: String,
    pub entries_analyzed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_entry_wire_format() {
        let entry = MoodEntry {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            mood: Mood::Anxious,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json, serde_json::json!({ "date": "2024-03-01", "mood": "Anxious" }));
    }

    #[test]
    fn test_unknown_mood_rejected() {
        let result = serde_json::from_str::<LogMoodRequest>(r#"{"mood":"Elated"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_table_response_no_data_tag() {
        let resp = MoodTableResponse::NoData {
            message: "No mood data available".into(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "no_data");
    }
}
