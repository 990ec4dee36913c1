//! Team Elo rating law
//!
//! A team's strength is the sum of its members' ratings. The team-level
//! change is `K * (actual - expected)` and every member of a team receives
//! the same share, `round(team_delta / team_size)`, rounded half away from
//! zero. Because each team is rounded independently the post-rounding total
//! is not guaranteed to be exactly zero.

use crate::error::{RankingError, Result};
use crate::types::{PlayerId, RatingDeltas, Team};
use serde::{Deserialize, Serialize};
use skillratings::elo::EloRating;
use std::collections::HashSet;

/// Maximum rating swing per battle
pub const K_FACTOR: f64 = 32.0;

/// Probability that the `self` side outright beats the opponent
///
/// `1 / (1 + 10^((opponent - self) / 400))`, always inside (0, 1) for
/// finite inputs of realistic magnitude.
pub fn expected_score(rating_self: f64, rating_opponent: f64) -> f64 {
    let (expected, _) = skillratings::elo::expected_score(
        &EloRating {
            rating: rating_self,
        },
        &EloRating {
            rating: rating_opponent,
        },
    );
    expected
}

/// Effective rating of a roster: the plain sum of member ratings
pub fn team_rating(ratings: &[i32]) -> i64 {
    ratings.iter().map(|&rating| rating as i64).sum()
}

/// Real-valued, pre-rounding rating change owed to each team
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamDeltas {
    pub team_a: f64,
    pub team_b: f64,
}

impl TeamDeltas {
    /// Change owed to the given side
    pub fn for_team(&self, team: Team) -> f64 {
        match team {
            Team::A => self.team_a,
            Team::B => self.team_b,
        }
    }
}

/// Apply the update law to two aggregated team ratings
///
/// Team B's change is the exact negation of Team A's, so the pair always
/// sums to zero before rounding.
pub fn team_deltas(team_a_rating: f64, team_b_rating: f64, winner: Team) -> TeamDeltas {
    let expected_a = expected_score(team_a_rating, team_b_rating);
    let actual_a = match winner {
        Team::A => 1.0,
        Team::B => 0.0,
    };

    let team_a = K_FACTOR * (actual_a - expected_a);
    TeamDeltas {
        team_a,
        team_b: -team_a,
    }
}

/// Share of a team delta given to each member
///
/// Rosters are validated non-empty before this is reached.
pub fn per_player_delta(team_delta: f64, team_size: usize) -> i32 {
    debug_assert!(team_size > 0, "team size must be positive");
    // f64::round rounds half away from zero
    (team_delta / team_size as f64).round() as i32
}

/// Reject empty, overlapping or self-duplicated rosters
pub fn validate_rosters(team_a: &[PlayerId], team_b: &[PlayerId]) -> Result<()> {
    if team_a.is_empty() {
        return Err(RankingError::validation("Team A must have at least one player"));
    }
    if team_b.is_empty() {
        return Err(RankingError::validation("Team B must have at least one player"));
    }

    let mut seen = HashSet::with_capacity(team_a.len() + team_b.len());
    for (team, roster) in [(Team::A, team_a), (Team::B, team_b)] {
        for player_id in roster {
            if !seen.insert(*player_id) {
                let reason = if team == Team::B && team_a.contains(player_id) {
                    format!("Player {} cannot be on both teams", player_id)
                } else {
                    format!("Player {} is listed twice in Team {}", player_id, team)
                };
                return Err(RankingError::Validation { reason });
            }
        }
    }

    Ok(())
}

/// Compute the signed integer delta for every participant
///
/// Rosters are `(player_id, current_rating)` pairs. Fails with a validation
/// error on empty or overlapping rosters; otherwise pure arithmetic.
pub fn compute_rating_deltas(
    team_a: &[(PlayerId, i32)],
    team_b: &[(PlayerId, i32)],
    winner: Team,
) -> Result<RatingDeltas> {
    let ids_a: Vec<PlayerId> = team_a.iter().map(|(id, _)| *id).collect();
    let ids_b: Vec<PlayerId> = team_b.iter().map(|(id, _)| *id).collect();
    validate_rosters(&ids_a, &ids_b)?;

    let ratings_a: Vec<i32> = team_a.iter().map(|(_, rating)| *rating).collect();
    let ratings_b: Vec<i32> = team_b.iter().map(|(_, rating)| *rating).collect();

    let deltas = team_deltas(
        team_rating(&ratings_a) as f64,
        team_rating(&ratings_b) as f64,
        winner,
    );

    let share_a = per_player_delta(deltas.team_a, team_a.len());
    let share_b = per_player_delta(deltas.team_b, team_b.len());

    let mut result = RatingDeltas::new();
    for id in ids_a {
        result.insert(id, share_a);
    }
    for id in ids_b {
        result.insert(id, share_b);
    }

    Ok(result)
}
