pub mod assistant;
pub mod challenges;
pub mod feed;
#[cfg(test)]
pub mod mock;
pub mod llm;
pub mod moderation;
pub mod mood_log;
pub mod openai;
