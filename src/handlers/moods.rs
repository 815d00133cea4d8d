use axum::{extract::State, Extension, Json};

use crate::error::{AppError, AppResult};
use crate::models::mood::{
    LogMoodRequest, MoodAnalysisResponse, MoodEntry, MoodListResponse, MoodTableResponse,
    PersistResponse,
};
use crate::session::Session;
use crate::AppState;

const NO_MOOD_DATA: &str = "No mood data available. Please log your mood first.";

pub async fn log_mood(
    Extension(session): Extension<Session>,
    Json(body): Json<LogMoodRequest>,
) -> Json<MoodEntry> {
    let mut state = session.state.lock().await;
    let entry = state.mood_log.append(body.mood);
    tracing::info!(session_id = %session.id, mood = entry.mood.as_str(), "Mood logged");
    Json(entry)
}

pub async fn list_moods(Extension(session): Extension<Session>) -> Json<MoodListResponse> {
    let state = session.state.lock().await;
    let entries = state.mood_log.entries().to_vec();
    Json(MoodListResponse {
        total: entries.len(),
        entries,
    })
}

pub async fn mood_table(Extension(session): Extension<Session>) -> Json<MoodTableResponse> {
    let state = session.state.lock().await;
    let response = match state.mood_log.to_table() {
        Some(table) => MoodTableResponse::Table {
            rendered: table.render(),
            rows: table.into_rows(),
        },
        None => MoodTableResponse::NoData {
            message: NO_MOOD_DATA.into(),
        },
    };
    Json(response)
}

pub async fn save_moods(Extension(session): Extension<Session>) -> AppResult<Json<PersistResponse>> {
    let state = session.state.lock().await;
    state.mood_log.persist().await?;
    Ok(Json(PersistResponse {
        path: state.mood_log.path().display().to_string(),
        entries: state.mood_log.len(),
    }))
}

pub async fn load_moods(Extension(session): Extension<Session>) -> AppResult<Json<MoodListResponse>> {
    let mut state = session.state.lock().await;
    let entries = state.mood_log.restore().await?.to_vec();
    Ok(Json(MoodListResponse {
        total: entries.len(),
        entries,
    }))
}

pub async fn analyze_moods(
    State(app): State<AppState>,
    Extension(session): Extension<Session>,
) -> AppResult<Json<MoodAnalysisResponse>> {
    // Snapshot the table so the session is not locked across the API call
    let table = {
        let state = session.state.lock().await;
        state.mood_log.to_table()
    }
    .ok_or_else(|| AppError::Validation(NO_MOOD_DATA.into()))?;

    let insights = app.assistant.analyze_mood_patterns(&table).await?;
    Ok(Json(MoodAnalysisResponse {
        insights,
        entries_analyzed: table.rows().len(),
    }))
}
