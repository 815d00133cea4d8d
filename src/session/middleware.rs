use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use super::{requested_session_id, SESSION_HEADER};
use crate::AppState;

/// Resolve the caller's session from `x-session-id`, starting a new one when
/// the header is missing or not a UUID. The resolved id is echoed back.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let id = requested_session_id(req.headers()).unwrap_or_else(|| {
        let id = Uuid::new_v4();
        tracing::debug!(session_id = %id, "No valid session header, issuing new session");
        id
    });

    let session = state.sessions.get_or_create(id).await;
    req.extensions_mut().insert(session);

    let mut response = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
        response.headers_mut().insert(SESSION_HEADER, value);
    }
    response
}
