//! Common types used throughout the ranking service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for players
pub type PlayerId = Uuid;

/// Unique identifier for recorded battles
pub type BattleId = Uuid;

/// Signed integer rating change per participant
pub type RatingDeltas = BTreeMap<PlayerId, i32>;

/// Side of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    /// The opposing side
    pub fn opponent(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::A => write!(f, "A"),
            Team::B => write!(f, "B"),
        }
    }
}

impl FromStr for Team {
    type Err = crate::error::RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Team::A),
            "B" => Ok(Team::B),
            other => Err(crate::error::RankingError::validation(format!(
                "Winning team must be 'A' or 'B', got '{}'",
                other
            ))),
        }
    }
}

/// Ranking state of one competitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub rating: i32,
    pub wins: u32,
    pub losses: u32,
    pub last_battle: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Player {
    /// Create a fresh player with no battle history
    pub fn new(name: impl Into<String>, rating: i32) -> Self {
        Self {
            id: crate::utils::generate_id(),
            name: name.into(),
            rating,
            wins: 0,
            losses: 0,
            last_battle: None,
            created_at: crate::utils::current_timestamp(),
        }
    }

    /// Total battles this player has taken part in
    pub fn battles_played(&self) -> u32 {
        self.wins + self.losses
    }

    /// Win percentage in the range 0..=100
    pub fn win_rate(&self) -> f64 {
        crate::utils::win_rate(self.wins, self.losses)
    }
}

/// Request to register a new player
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlayer {
    pub name: String,
    /// Starting rating; the configured default is used when absent
    #[serde(default)]
    pub rating: Option<i32>,
}

/// Request to record a completed battle
///
/// `winning_team` stays a string here so that a malformed tag is rejected
/// as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBattle {
    pub team_a: Vec<PlayerId>,
    pub team_b: Vec<PlayerId>,
    pub winning_team: String,
    #[serde(default)]
    pub match_format: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// Rosters to evaluate without recording anything
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub team_a: Vec<PlayerId>,
    pub team_b: Vec<PlayerId>,
}

/// An immutable record of one completed battle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Battle {
    pub id: BattleId,
    pub team_a: Vec<PlayerId>,
    pub team_b: Vec<PlayerId>,
    pub winning_team: Team,
    pub rating_deltas: RatingDeltas,
    pub match_format: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Battle {
    /// Which side the player fought on, if any
    pub fn team_of(&self, player_id: &PlayerId) -> Option<Team> {
        if self.team_a.contains(player_id) {
            Some(Team::A)
        } else if self.team_b.contains(player_id) {
            Some(Team::B)
        } else {
            None
        }
    }

    /// True when the player was on the winning side
    pub fn is_winner(&self, player_id: &PlayerId) -> bool {
        self.team_of(player_id) == Some(self.winning_team)
    }

    /// All participant ids, Team A first
    pub fn participants(&self) -> impl Iterator<Item = &PlayerId> {
        self.team_a.iter().chain(self.team_b.iter())
    }

    /// Largest absolute rating swing in this battle
    pub fn max_swing(&self) -> i32 {
        self.rating_deltas
            .values()
            .map(|delta| delta.abs())
            .max()
            .unwrap_or(0)
    }
}

/// Prediction for a prospective battle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattlePreview {
    pub team_a_rating: i64,
    pub team_b_rating: i64,
    pub team_a_win_probability: f64,
    pub team_b_win_probability: f64,
    /// Deltas that would be applied if Team A wins
    pub if_a_wins: RatingDeltas,
    /// Deltas that would be applied if Team B wins
    pub if_b_wins: RatingDeltas,
}

/// One row of the leaderboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStanding {
    pub rank: usize,
    #[serde(flatten)]
    pub player: Player,
    pub win_rate: f64,
}

/// Aggregate figures for the whole leaderboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_players: usize,
    pub total_battles: usize,
    /// Number of battles recorded per match format label
    pub match_formats: BTreeMap<String, usize>,
    pub top_player: Option<PlayerId>,
}
