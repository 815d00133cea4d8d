use axum::{extract::State, Extension, Json};
use chrono::Utc;

use crate::error::AppResult;
use crate::models::care_plan::{GeneratePlanRequest, PlanResponse, SelfCarePlan};
use crate::session::Session;
use crate::AppState;

pub async fn get_plan(Extension(session): Extension<Session>) -> Json<PlanResponse> {
    let state = session.state.lock().await;
    Json(PlanResponse {
        plan: state.self_care_plan.clone(),
    })
}

/// Generates a new plan and replaces any previous one for the session.
pub async fn generate_plan(
    State(app): State<AppState>,
    Extension(session): Extension<Session>,
    Json(body): Json<GeneratePlanRequest>,
) -> AppResult<Json<PlanResponse>> {
    let text = app
        .assistant
        .generate_self_care_plan(body.stress_level, &body.preferences)
        .await?;

    let plan = SelfCarePlan {
        plan: text,
        stress_level: body.stress_level,
        preferences: body.preferences,
        generated_at: Utc::now(),
    };

    let mut state = session.state.lock().await;
    state.self_care_plan = Some(plan.clone());
    tracing::info!(session_id = %session.id, stress_level = %plan.stress_level, "Self-care plan generated");

    Ok(Json(PlanResponse { plan: Some(plan) }))
}
