//! Battle Ranks - team Elo rating service
//!
//! This crate records battles between teams of players, moves each
//! player's rating with a team-based Elo calculation and can undo any
//! recorded battle exactly by replaying its stored rating changes.

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod rating;
pub mod service;
pub mod storage;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RankingError, Result};
pub use types::*;

// Re-export key components
pub use rating::{RatingCalculator, TeamEloCalculator};
pub use service::RankingService;
pub use storage::{InMemoryStorage, RankingStorage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
