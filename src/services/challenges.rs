use crate::models::challenge::{Challenge, CompletionOutcome, RewardTier};

/// Seeded catalog, in display order.
pub const CATALOG: [(&str, u32); 3] = [
    ("7 Days of Gratitude", 50),
    ("Mindful Study Breaks", 30),
    ("Daily Meditation", 20),
];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Unknown challenge: {0}")]
    UnknownChallenge(String),
}

/// Fixed set of challenges. Completion is one-way and the points total is
/// always the sum over completed challenges.
#[derive(Debug, Clone)]
pub struct ChallengeLedger {
    challenges: Vec<Challenge>,
}

impl Default for ChallengeLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ChallengeLedger {
    pub fn new() -> Self {
        Self {
            challenges: CATALOG
                .iter()
                .map(|(name, points)| Challenge {
                    name: (*name).to_string(),
                    points: *points,
                    completed: false,
                })
                .collect(),
        }
    }

    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    pub fn complete(&mut self, name: &str) -> Result<CompletionOutcome, LedgerError> {
        let challenge = self
            .challenges
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| LedgerError::UnknownChallenge(name.to_string()))?;

        let points_awarded = if challenge.completed {
            tracing::debug!(challenge = %name, "Challenge already completed");
            0
        } else {
            challenge.completed = true;
            tracing::info!(challenge = %name, points = challenge.points, "Challenge completed");
            challenge.points
        };

        Ok(CompletionOutcome {
            challenge: name.to_string(),
            accepted: points_awarded > 0,
            points_awarded,
            points_total: self.points_total(),
        })
    }

    pub fn points_total(&self) -> u32 {
        self.challenges
            .iter()
            .filter(|c| c.completed)
            .map(|c| c.points)
            .sum()
    }

    pub fn rewards(&self) -> Vec<RewardTier> {
        RewardTier::unlocked_by(self.points_total())
    }
}
