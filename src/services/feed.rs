use chrono::Utc;

use super::moderation::{ModerationError, ModerationGate};
use crate::models::post::{CommunityPost, RejectReason, SubmitOutcome, ANONYMOUS};

/// Result of screening a submission, before it is recorded.
#[derive(Debug)]
pub enum Screening {
    Accepted(CommunityPost),
    Rejected(RejectReason),
}

/// Append-only list of moderated posts.
#[derive(Debug, Default)]
pub struct CommunityFeed {
    posts: Vec<CommunityPost>,
}

impl CommunityFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen and record in one step.
    pub async fn submit(
        &mut self,
        name: Option<&str>,
        content: &str,
        gate: &ModerationGate,
    ) -> Result<SubmitOutcome, ModerationError> {
        let screening = Self::screen(name, content, gate).await?;
        Ok(self.record(screening))
    }

    /// Decide whether a submission may be published without touching any feed.
    /// Blank content is rejected before moderation is consulted. A moderation
    /// failure is returned as an error unless the gate's policy is fail-open.
    pub async fn screen(
        name: Option<&str>,
        content: &str,
        gate: &ModerationGate,
    ) -> Result<Screening, ModerationError> {
        if content.trim().is_empty() {
            return Ok(Screening::Rejected(RejectReason::Empty));
        }

        if gate.check(content).await? {
            tracing::info!("Community post rejected by moderation");
            return Ok(Screening::Rejected(RejectReason::Flagged));
        }

        let name = match name.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => ANONYMOUS.to_string(),
        };

        Ok(Screening::Accepted(CommunityPost {
            name,
            content: content.to_string(),
            timestamp: Utc::now(),
        }))
    }

    /// Append an accepted post. Rejections leave the feed unchanged.
    pub fn record(&mut self, screening: Screening) -> SubmitOutcome {
        match screening {
            Screening::Accepted(post) => {
                self.posts.push(post.clone());
                tracing::info!(total = self.posts.len(), "Community post published");
                SubmitOutcome::published(post)
            }
            Screening::Rejected(reason) => SubmitOutcome::rejected(reason),
        }
    }

    /// Newest first.
    pub fn list(&self) -> Vec<CommunityPost> {
        self.posts.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::MockBackend;
    use crate::services::moderation::ModerationPolicy;
    use std::sync::Arc;

    fn gate(backend: MockBackend, policy: ModerationPolicy) -> (ModerationGate, Arc<MockBackend>) {
        let backend = Arc::new(backend);
        (ModerationGate::new(backend.clone(), policy), backend)
    }

    #[tokio::test]
    async fn test_blank_content_rejected_without_moderation() {
        let (gate, backend) = gate(MockBackend::new(), ModerationPolicy::FailClosed);
        let mut feed = CommunityFeed::new();

        let outcome = feed.submit(Some(""), "   ", &gate).await.unwrap();
        assert!(!outcome.published);
        assert_eq!(outcome.reason, Some(RejectReason::Empty));
        assert!(feed.is_empty());
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_flagged_content_rejected() {
        let (gate, _) = gate(MockBackend::new().with_flagged(true), ModerationPolicy::FailClosed);
        let mut feed = CommunityFeed::new();

        let outcome = feed.submit(Some("Alice"), "hello", &gate).await.unwrap();
        assert!(!outcome.published);
        assert_eq!(outcome.reason, Some(RejectReason::Flagged));
        assert!(feed.is_empty());
    }

    #[tokio::test]
    async fn test_blank_name_defaults_to_anonymous() {
        let (gate, _) = gate(MockBackend::new(), ModerationPolicy::FailClosed);
        let mut feed = CommunityFeed::new();

        let outcome = feed.submit(Some(""), "hello", &gate).await.unwrap();
        assert!(outcome.published);
        assert_eq!(outcome.post.as_ref().unwrap().name, "Anonymous");

        let listed = feed.list();
        assert_eq!(listed[0].name, "Anonymous");
        assert_eq!(listed[0].content, "hello");
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let (gate, _) = gate(MockBackend::new(), ModerationPolicy::FailClosed);
        let mut feed = CommunityFeed::new();
        feed.submit(Some("Alice"), "first", &gate).await.unwrap();
        feed.submit(None, "second", &gate).await.unwrap();

        let contents: Vec<_> = feed.list().into_iter().map(|p| p.content).collect();
        assert_eq!(contents, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_moderation_failure_fail_closed() {
        let (gate, _) = gate(MockBackend::new().failing(), ModerationPolicy::FailClosed);
        let mut feed = CommunityFeed::new();

        assert!(feed.submit(Some("Bob"), "hello", &gate).await.is_err());
        assert!(feed.is_empty());
    }

    #[tokio::test]
    async fn test_moderation_failure_fail_open() {
        let (gate, _) = gate(MockBackend::new().failing(), ModerationPolicy::FailOpen);
        let mut feed = CommunityFeed::new();

        let outcome = feed.submit(Some("Bob"), "hello", &gate).await.unwrap();
        assert!(outcome.published);
        assert_eq!(feed.len(), 1);
    }

    #[tokio::test]
    async fn test_screen_does_not_touch_feed_until_recorded() {
        let (gate, backend) = gate(MockBackend::new(), ModerationPolicy::FailClosed);
        let mut feed = CommunityFeed::new();

        let screening = CommunityFeed::screen(Some(" Alice "), "hello", &gate).await.unwrap();
        assert_eq!(backend.call_count(), 1);
        assert!(feed.is_empty());

        let outcome = feed.record(screening);
        assert!(outcome.published);
        assert_eq!(feed.list()[0].name, "Alice");

        let rejected = CommunityFeed::screen(None, " ", &gate).await.unwrap();
        assert!(!feed.record(rejected).published);
        assert_eq!(feed.len(), 1);
    }
}
