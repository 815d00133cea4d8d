use std::env;
use std::path::PathBuf;

use crate::services::moderation::ModerationPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    pub openai_api_key: String,
    pub openai_base_url: String,
    pub chat_model: String,
    pub journaling_model: String,
    pub image_size: String,
    pub llm_timeout_secs: u64,

    pub moderation_policy: ModerationPolicy,

    pub mood_log_dir: PathBuf,
    pub session_ttl_secs: u64,

    // Generative endpoints are throttled per session
    pub ai_rate_limit_max: u32,
    pub ai_rate_limit_window_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_else(|_| String::new()),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".into()),
            chat_model: env::var("OPENAI_CHAT_MODEL")
                .unwrap_or_else(|_| "gpt-3.5-turbo".into()),
            journaling_model: env::var("OPENAI_JOURNALING_MODEL")
                .unwrap_or_else(|_| "gpt-4".into()),
            image_size: env::var("OPENAI_IMAGE_SIZE").unwrap_or_else(|_| "512x512".into()),
            llm_timeout_secs: env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .expect("LLM_TIMEOUT_SECS must be a number"),

            moderation_policy: env::var("MODERATION_FAILURE_POLICY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),

            mood_log_dir: env::var("MOOD_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            session_ttl_secs: env::var("SESSION_TTL_SECS")
                .unwrap_or_else(|_| "7200".into()) // 2 hours
                .parse()
                .unwrap_or(7200),

            ai_rate_limit_max: env::var("AI_RATE_LIMIT_MAX")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .unwrap_or(10),
            ai_rate_limit_window_secs: env::var("AI_RATE_LIMIT_WINDOW_SECS")
                .unwrap_or_else(|_| "60".into())
                .parse()
                .unwrap_or(60),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
impl Config {
    /// Configuration for in-process tests: no network defaults, logs under `dir`.
    pub fn for_tests(dir: impl Into<PathBuf>) -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:3000".into(),
            openai_api_key: "test-key".into(),
            openai_base_url: "http://127.0.0.1:9".into(),
            chat_model: "gpt-3.5-turbo".into(),
            journaling_model: "gpt-4".into(),
            image_size: "512x512".into(),
            llm_timeout_secs: 5,
            moderation_policy: ModerationPolicy::FailClosed,
            mood_log_dir: dir.into(),
            session_ttl_secs: 7200,
            ai_rate_limit_max: 10,
            ai_rate_limit_window_secs: 60,
        }
    }
}
