use std::sync::Arc;
use std::time::Duration;

mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod services;
mod session;

use config::Config;
use services::assistant::GenerativeAssistant;
use services::moderation::ModerationGate;
use services::openai::OpenAiClient;
use session::rate_limit::RateLimitState;
use session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: SessionStore,
    pub assistant: GenerativeAssistant,
    pub moderation: ModerationGate,
    pub rate_limiter: RateLimitState,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindmosaic_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    tokio::fs::create_dir_all(&config.mood_log_dir).await?;

    let openai = Arc::new(OpenAiClient::from_config(&config)?);
    let assistant = GenerativeAssistant::from_config(openai.clone(), &config);
    let moderation = ModerationGate::new(openai, config.moderation_policy);
    tracing::info!(policy = ?moderation.policy(), "Moderation gate configured");

    let state = AppState {
        config: config.clone(),
        sessions: SessionStore::new(config.mood_log_dir.clone()),
        assistant,
        moderation,
        rate_limiter: RateLimitState::new(
            config.ai_rate_limit_max,
            config.ai_rate_limit_window_secs,
        ),
    };

    // Start session cleanup worker (purges idle sessions every 5 min)
    session::spawn_session_cleanup_worker(
        state.sessions.clone(),
        state.rate_limiter.clone(),
        Duration::from_secs(config.session_ttl_secs),
    );

    let app = routes::build_router(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    // Client addresses key the generative limiter for callers without a live session
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;

    Ok(())
}
