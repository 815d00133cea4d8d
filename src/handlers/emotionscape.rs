use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::AppResult;
use crate::models::care_plan::{EmotionRequest, JournalingPromptResponse, StoryResponse};
use crate::AppState;

pub async fn generate_story(
    State(app): State<AppState>,
    Json(body): Json<EmotionRequest>,
) -> AppResult<Json<StoryResponse>> {
    let story = app.assistant.generate_story(&body.emotion).await?;
    Ok(Json(StoryResponse {
        emotion: body.emotion.trim().to_string(),
        story,
    }))
}

/// Responds with the raw image bytes.
pub async fn generate_mosaic(
    State(app): State<AppState>,
    Json(body): Json<EmotionRequest>,
) -> AppResult<Response> {
    let image = app.assistant.generate_mosaic(&body.emotion).await?;
    Ok(([(header::CONTENT_TYPE, image.content_type)], image.bytes).into_response())
}

pub async fn journaling_prompt(
    State(app): State<AppState>,
) -> AppResult<Json<JournalingPromptResponse>> {
    let prompt = app.assistant.generate_journaling_prompt().await?;
    Ok(Json(JournalingPromptResponse { prompt }))
}
