//! Rating calculator trait and the team Elo implementation
//!
//! The service only talks to [`RatingCalculator`], so alternative update
//! laws can be swapped in without touching battle bookkeeping.

use crate::error::Result;
use crate::rating::elo::{self, K_FACTOR};
use crate::types::{PlayerId, RatingDeltas, Team};

/// Trait for calculating rating changes after battles
pub trait RatingCalculator: Send + Sync {
    /// Calculate the integer delta for every participant
    ///
    /// # Arguments
    /// * `team_a` - List of (player_id, current_rating) pairs
    /// * `team_b` - List of (player_id, current_rating) pairs
    /// * `winner` - Side that won the battle
    fn calculate_deltas(
        &self,
        team_a: &[(PlayerId, i32)],
        team_b: &[(PlayerId, i32)],
        winner: Team,
    ) -> Result<RatingDeltas>;

    /// Probability that Team A beats Team B
    fn win_probability(&self, team_a: &[i32], team_b: &[i32]) -> f64;

    /// Maximum swing per battle
    fn k_factor(&self) -> f64;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}

/// Sum-of-ratings team Elo with a fixed K-factor of 32
#[derive(Debug, Clone, Default)]
pub struct TeamEloCalculator;

impl TeamEloCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl RatingCalculator for TeamEloCalculator {
    fn calculate_deltas(
        &self,
        team_a: &[(PlayerId, i32)],
        team_b: &[(PlayerId, i32)],
        winner: Team,
    ) -> Result<RatingDeltas> {
        elo::compute_rating_deltas(team_a, team_b, winner)
    }

    fn win_probability(&self, team_a: &[i32], team_b: &[i32]) -> f64 {
        elo::expected_score(
            elo::team_rating(team_a) as f64,
            elo::team_rating(team_b) as f64,
        )
    }

    fn k_factor(&self) -> f64 {
        K_FACTOR
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "team_elo",
            "k_factor": self.k_factor(),
            "aggregation": "sum",
            "rounding": "half_away_from_zero"
        })
    }
}
