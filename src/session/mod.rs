//! Per-session state and the registry that owns it.
//!
//! Every dashboard action runs against exactly one [`SessionState`]. Sessions
//! are keyed by the id carried in the `x-session-id` header and each one sits
//! behind its own lock, so two sessions never contend.

pub mod middleware;
pub mod rate_limit;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::HeaderMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::care_plan::SelfCarePlan;
use crate::services::challenges::ChallengeLedger;
use crate::services::feed::CommunityFeed;
use crate::services::mood_log::MoodLogStore;

pub const SESSION_HEADER: &str = "x-session-id";

/// The session id the client asked for, if the header holds a valid UUID.
pub fn requested_session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v.trim()).ok())
}

#[derive(Debug)]
pub struct SessionState {
    pub mood_log: MoodLogStore,
    pub challenges: ChallengeLedger,
    pub feed: CommunityFeed,
    pub self_care_plan: Option<SelfCarePlan>,
}

impl SessionState {
    pub fn new(mood_log_path: PathBuf) -> Self {
        Self {
            mood_log: MoodLogStore::new(mood_log_path),
            challenges: ChallengeLedger::new(),
            feed: CommunityFeed::new(),
            self_care_plan: None,
        }
    }
}

/// Request-scoped handle inserted by [`middleware::require_session`].
#[derive(Clone)]
pub struct Session {
    pub id: Uuid,
    pub state: Arc<Mutex<SessionState>>,
}

struct SessionEntry {
    state: Arc<Mutex<SessionState>>,
    last_seen: Instant,
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, SessionEntry>>>,
    mood_log_dir: PathBuf,
}

impl SessionStore {
    pub fn new(mood_log_dir: impl Into<PathBuf>) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            mood_log_dir: mood_log_dir.into(),
        }
    }

    pub fn mood_log_path(&self, id: Uuid) -> PathBuf {
        self.mood_log_dir.join(format!("mood_log_{}.json", id))
    }

    /// Look up a session, creating fresh state if the id is unknown.
    pub async fn get_or_create(&self, id: Uuid) -> Session {
        let mut sessions = self.sessions.lock().await;
        let now = Instant::now();

        let entry = sessions.entry(id).or_insert_with(|| {
            tracing::info!(session_id = %id, "Session started");
            SessionEntry {
                state: Arc::new(Mutex::new(SessionState::new(self.mood_log_path(id)))),
                last_seen: now,
            }
        });
        entry.last_seen = now;

        Session {
            id,
            state: entry.state.clone(),
        }
    }

    /// Whether `id` names a live session. Does not refresh its idle timer.
    pub async fn contains(&self, id: Uuid) -> bool {
        self.sessions.lock().await.contains_key(&id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Drop sessions idle for longer than `ttl`. Returns how many were removed.
    pub async fn purge_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        let now = Instant::now();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) < ttl);
        before - sessions.len()
    }
}

/// Purge idle sessions every 5 minutes. Persisted mood logs stay on disk.
pub fn spawn_session_cleanup_worker(
    store: SessionStore,
    limiter: rate_limit::RateLimitState,
    ttl: Duration,
) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;
            let purged = store.purge_idle(ttl).await;
            limiter.cleanup().await;
            if purged > 0 {
                tracing::info!(purged = purged, "Idle sessions purged");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mood::Mood;

    #[tokio::test]
    async fn test_same_id_shares_state() {
        let store = SessionStore::new("/tmp");
        let id = Uuid::new_v4();

        let a = store.get_or_create(id).await;
        a.state.lock().await.mood_log.append(Mood::Calm);

        let b = store.get_or_create(id).await;
        assert_eq!(b.state.lock().await.mood_log.len(), 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new("/tmp");
        let a = store.get_or_create(Uuid::new_v4()).await;
        let b = store.get_or_create(Uuid::new_v4()).await;

        a.state.lock().await.challenges.complete("Daily Meditation").unwrap();
        assert_eq!(b.state.lock().await.challenges.points_total(), 0);
    }

    #[tokio::test]
    async fn test_mood_log_path_is_keyed_by_session() {
        let store = SessionStore::new("/data");
        let id = Uuid::new_v4();
        let session = store.get_or_create(id).await;

        let expected = PathBuf::from(format!("/data/mood_log_{}.json", id));
        assert_eq!(store.mood_log_path(id), expected);
        assert_eq!(session.state.lock().await.mood_log.path(), expected.as_path());
    }

    #[tokio::test]
    async fn test_purge_idle() {
        let store = SessionStore::new("/tmp");
        store.get_or_create(Uuid::new_v4()).await;

        assert_eq!(store.purge_idle(Duration::from_secs(3600)).await, 0);
        assert_eq!(store.purge_idle(Duration::ZERO).await, 1);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_contains_only_live_sessions() {
        let store = SessionStore::new("/tmp");
        let id = Uuid::new_v4();
        assert!(!store.contains(id).await);

        store.get_or_create(id).await;
        assert!(store.contains(id).await);
        assert!(!store.contains(Uuid::new_v4()).await);
        assert_eq!(store.len().await, 1);
    }

    #[test]
    fn test_requested_session_id_rejects_garbage() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        assert_eq!(requested_session_id(&headers), None);

        headers.insert(SESSION_HEADER, "not-a-uuid".parse().unwrap());
        assert_eq!(requested_session_id(&headers), None);

        headers.insert(SESSION_HEADER, format!(" {} ", id).parse().unwrap());
        assert_eq!(requested_session_id(&headers), Some(id));
    }
}
