pub mod analytics;
pub mod challenges;
pub mod community;
pub mod emotionscape;
pub mod health;
pub mod moods;
pub mod self_care;
pub mod session;
pub mod wellness;
