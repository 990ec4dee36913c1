//! Team Elo rating engine
//!
//! This module provides the rating update law, the calculator interface
//! used by the service, and the ledger that applies and reverses battles
//! on player records.

pub mod calculator;
pub mod elo;
pub mod ledger;

// Re-export commonly used types
pub use calculator::{RatingCalculator, TeamEloCalculator};
pub use elo::{compute_rating_deltas, expected_score, TeamDeltas, K_FACTOR};
