use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Challenge {
    pub name: String,
    pub points: u32,
    pub completed: bool,
}

/// Result of a completion attempt. Repeat completions are accepted=false.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CompletionOutcome {
    pub challenge: String,
    pub accepted: bool,
    pub points_awarded: u32,
    pub points_total: u32,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RewardTier {
    VirtualPlant,
    MosaicElement,
}

impl RewardTier {
    pub const ALL: [RewardTier; 2] = [RewardTier::VirtualPlant, RewardTier::MosaicElement];

    pub fn threshold(&self) -> u32 {
        match self {
            RewardTier::VirtualPlant => 50,
            RewardTier::MosaicElement => 100,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RewardTier::VirtualPlant => "Virtual Plant for your MindGarden",
            RewardTier::MosaicElement => "New Mosaic Element for your MindMosaic",
        }
    }

    pub fn unlocked_by(points: u32) -> Vec<RewardTier> {
        Self::ALL
            .into_iter()
            .filter(|tier| points >= tier.threshold())
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct Reward {
    pub tier: RewardTier,
    pub threshold: u32,
    pub description: &'static str,
}

impl From<RewardTier> for Reward {
    fn from(tier: RewardTier) -> Self {
        Self {
            tier,
            threshold: tier.threshold(),
            description: tier.description(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CompleteChallengeRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ChallengeBoard {
    pub points: u32,
    pub challenges: Vec<Challenge>,
    pub rewards: Vec<Reward>,
}
