use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::session;
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    // Every call here reaches the external API. The limiter is the outer
    // layer, so throttled calls are turned away before a session is resolved.
    let generative_routes = Router::new()
        .route("/api/emotionscape/story", post(handlers::emotionscape::generate_story))
        .route("/api/emotionscape/mosaic", post(handlers::emotionscape::generate_mosaic))
        .route("/api/journaling-prompt", get(handlers::emotionscape::journaling_prompt))
        .route("/api/moods/analyze", post(handlers::moods::analyze_moods))
        .route("/api/self-care-plan/generate", post(handlers::self_care::generate_plan))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session::middleware::require_session,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session::rate_limit::rate_limit_generative,
        ));

    let session_routes = Router::new()
        .route("/api/session", get(handlers::session::get_session))
        // Mood tracker
        .route("/api/moods", post(handlers::moods::log_mood))
        .route("/api/moods", get(handlers::moods::list_moods))
        .route("/api/moods/table", get(handlers::moods::mood_table))
        .route("/api/moods/save", post(handlers::moods::save_moods))
        .route("/api/moods/load", post(handlers::moods::load_moods))
        // Challenges
        .route("/api/challenges", get(handlers::challenges::list_challenges))
        .route(
            "/api/challenges/complete",
            post(handlers::challenges::complete_challenge),
        )
        // Community
        .route("/api/community/posts", get(handlers::community::list_posts))
        .route("/api/community/posts", post(handlers::community::submit_post))
        // Self-care
        .route("/api/self-care-plan", get(handlers::self_care::get_plan))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session::middleware::require_session,
        ));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/wellness/exercises", get(handlers::wellness::list_exercises))
        .route("/api/analytics", get(handlers::analytics::get_analytics));

    Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .merge(generative_routes)
        .layer(cors_layer(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let mut origins: Vec<axum::http::HeaderValue> = Vec::new();
    match state.config.frontend_url.parse::<axum::http::HeaderValue>() {
        Ok(hv) => origins.push(hv),
        Err(_) => tracing::warn!(url = %state.config.frontend_url, "Invalid FRONTEND_URL, skipping"),
    }
    // In dev, also allow LAN access (e.g. testing from another device)
    if let Ok(extra) = std::env::var("CORS_EXTRA_ORIGINS") {
        for o in extra.split(',') {
            if let Ok(hv) = o.trim().parse::<axum::http::HeaderValue>() {
                origins.push(hv);
            }
        }
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            axum::http::HeaderName::from_static(session::SESSION_HEADER),
        ])
        .expose_headers([axum::http::HeaderName::from_static(session::SESSION_HEADER)])
}
