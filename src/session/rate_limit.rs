use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

use super::requested_session_id;
use crate::error::AppError;
use crate::AppState;

/// In-memory fixed-window limiter for generative calls (single instance only).
#[derive(Clone)]
pub struct RateLimitState {
    entries: Arc<Mutex<HashMap<String, RateLimitEntry>>>,
    max_requests: u32,
    window: Duration,
}

struct RateLimitEntry {
    count: u32,
    window_start: Instant,
}

impl RateLimitState {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    /// Returns Ok(remaining) or Err(retry_after) when the key is limited.
    pub async fn check(&self, key: &str) -> Result<u32, Duration> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();

        let entry = entries.entry(key.to_string()).or_insert(RateLimitEntry {
            count: 0,
            window_start: now,
        });

        // Reset window if expired
        if now.duration_since(entry.window_start) > self.window {
            entry.count = 0;
            entry.window_start = now;
        }

        if entry.count >= self.max_requests {
            let retry_after = self.window.saturating_sub(now.duration_since(entry.window_start));
            return Err(retry_after);
        }

        entry.count += 1;
        Ok(self.max_requests - entry.count)
    }

    pub async fn cleanup(&self) {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        let keep_for = self.window * 2;

        entries.retain(|_, entry| now.duration_since(entry.window_start) < keep_for);
    }
}

/// Throttle generative endpoints. Runs outside `require_session` so a
/// rejected call never starts a session.
///
/// A request naming a live session is counted against that session. Anything
/// else (no header, garbage, or an id the server has never issued) is counted
/// against the client address, so dropping the header does not reset the window.
pub async fn rate_limit_generative(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session_id = match requested_session_id(req.headers()) {
        Some(id) if state.sessions.contains(id).await => Some(id),
        _ => None,
    };

    let key = match (session_id, &connect_info) {
        (Some(id), _) => format!("generative:session:{}", id),
        (None, Some(ConnectInfo(addr))) => format!("generative:client:{}", addr.ip()),
        (None, None) => "generative:client:unknown".to_string(),
    };

    match state.rate_limiter.check(&key).await {
        Ok(remaining) => {
            tracing::debug!(key = %key, remaining = remaining, "Generative rate limit check passed");
            Ok(next.run(req).await)
        }
        Err(retry_after) => {
            tracing::warn!(
                key = %key,
                retry_after_secs = retry_after.as_secs(),
                "Generative rate limit exceeded"
            );
            Err(AppError::RateLimited)
        }
    }
}
