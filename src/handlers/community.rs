use axum::{extract::State, Extension, Json};

use crate::error::AppResult;
use crate::models::post::{PostListResponse, SubmitOutcome, SubmitPostRequest};
use crate::services::feed::CommunityFeed;
use crate::session::Session;
use crate::AppState;

pub async fn list_posts(Extension(session): Extension<Session>) -> Json<PostListResponse> {
    let state = session.state.lock().await;
    let posts = state.feed.list();
    Json(PostListResponse {
        total: posts.len(),
        posts,
    })
}

/// Rejections (blank or flagged) are a normal 200 with `published: false`.
pub async fn submit_post(
    State(app): State<AppState>,
    Extension(session): Extension<Session>,
    Json(body): Json<SubmitPostRequest>,
) -> AppResult<Json<SubmitOutcome>> {
    // Moderate before taking the session lock, as the generative handlers do
    let screening =
        CommunityFeed::screen(body.name.as_deref(), &body.content, &app.moderation).await?;

    let mut state = session.state.lock().await;
    Ok(Json(state.feed.record(screening)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::Mutex;
    use uuid::Uuid;

    use crate::config::Config;
    use crate::services::assistant::GenerativeAssistant;
    use crate::services::llm::{LlmError, Moderator};
    use crate::services::mock::MockBackend;
    use crate::services::moderation::{ModerationGate, ModerationPolicy};
    use crate::session::rate_limit::RateLimitState;
    use crate::session::{SessionState, SessionStore};

    /// Flags the post if the session it belongs to is locked while moderating.
    struct LockAwareModerator {
        state: Arc<Mutex<SessionState>>,
    }

    #[async_trait]
    impl Moderator for LockAwareModerator {
        async fn is_flagged(&self, _text: &str) -> Result<bool, LlmError> {
            Ok(self.state.try_lock().is_err())
        }
    }

    #[tokio::test]
    async fn test_session_not_locked_during_moderation() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests(dir.path());
        let sessions = SessionStore::new(config.mood_log_dir.clone());
        let session = sessions.get_or_create(Uuid::new_v4()).await;

        let moderator = Arc::new(LockAwareModerator {
            state: session.state.clone(),
        });
        let app = AppState {
            assistant: GenerativeAssistant::from_config(Arc::new(MockBackend::new()), &config),
            moderation: ModerationGate::new(moderator, ModerationPolicy::FailClosed),
            rate_limiter: RateLimitState::new(10, 60),
            sessions,
            config: Arc::new(config),
        };

        let body = SubmitPostRequest {
            name: Some("Alice".into()),
            content: "hello".into(),
        };
        let Json(outcome) = submit_post(State(app), Extension(session.clone()), Json(body))
            .await
            .unwrap();

        assert!(outcome.published);
        assert_eq!(session.state.lock().await.feed.len(), 1);
    }
}
