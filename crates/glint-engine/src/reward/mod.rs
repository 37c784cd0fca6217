pub mod manager;

pub use manager::{RewardManager, RewardPhase, REWARD_MESSAGES};
