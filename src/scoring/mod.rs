pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod validation;

pub use config::*;
pub use engine::{compute_leaderboard, ActionTally, LeaderboardEntry, LeaderboardSummary};
pub use error::LeaderboardError;
pub use filter::filter_by_threshold;
pub use validation::validate_scoring;
