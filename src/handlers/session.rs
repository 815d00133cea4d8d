use axum::{Extension, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::session::Session;

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub mood_entries: usize,
    pub points: u32,
    pub community_posts: usize,
    pub has_self_care_plan: bool,
}

pub async fn get_session(Extension(session): Extension<Session>) -> Json<SessionSummary> {
    let state = session.state.lock().await;
    Json(SessionSummary {
        session_id: session.id,
        mood_entries: state.mood_log.len(),
        points: state.challenges.points_total(),
        community_posts: state.feed.len(),
        has_self_care_plan: state.self_care_plan.is_some(),
    })
}
