use axum::{Extension, Json};

use crate::error::AppResult;
use crate::models::challenge::{ChallengeBoard, CompleteChallengeRequest, CompletionOutcome, Reward};
use crate::session::Session;

pub async fn list_challenges(Extension(session): Extension<Session>) -> Json<ChallengeBoard> {
    let state = session.state.lock().await;
    let ledger = &state.challenges;
    Json(ChallengeBoard {
        points: ledger.points_total(),
        challenges: ledger.challenges().to_vec(),
        rewards: ledger.rewards().into_iter().map(Reward::from).collect(),
    })
}

pub async fn complete_challenge(
    Extension(session): Extension<Session>,
    Json(body): Json<CompleteChallengeRequest>,
) -> AppResult<Json<CompletionOutcome>> {
    let mut state = session.state.lock().await;
    let outcome = state.challenges.complete(&body.name)?;
    Ok(Json(outcome))
}
