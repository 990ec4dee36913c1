//! Storage interface for players and battles
//!
//! The store is injected into the service at startup; the in-memory
//! implementation is the only backend shipped.

pub mod memory;

pub use memory::InMemoryStorage;

use crate::error::Result;
use crate::types::{Battle, BattleId, Player, PlayerId};
use std::collections::HashMap;

/// Trait for ranking storage operations
#[cfg_attr(test, mockall::automock)]
pub trait RankingStorage: Send + Sync {
    /// Get a player by id
    fn get_player(&self, player_id: &PlayerId) -> Result<Option<Player>>;

    /// Get a player by exact name
    fn get_player_by_name(&self, name: &str) -> Result<Option<Player>>;

    /// Get several players; unknown ids are simply absent from the map
    fn get_players(&self, player_ids: &[PlayerId]) -> Result<HashMap<PlayerId, Player>>;

    /// All players ordered by rating, highest first
    fn list_players(&self) -> Result<Vec<Player>>;

    /// Insert a new player, rejecting duplicate ids or names
    fn create_player(&self, player: Player) -> Result<()>;

    /// Remove a player. Battles referencing the player are left untouched.
    fn delete_player(&self, player_id: &PlayerId) -> Result<bool>;

    /// Get a battle by id
    fn get_battle(&self, battle_id: &BattleId) -> Result<Option<Battle>>;

    /// All battles, newest first
    fn list_battles(&self) -> Result<Vec<Battle>>;

    /// Store a battle together with its updated participants atomically
    fn commit_battle(&self, battle: Battle, players: Vec<Player>) -> Result<()>;

    /// Remove a battle and store its reverted participants atomically
    ///
    /// Returns false when the battle does not exist, in which case nothing
    /// is written.
    fn revert_battle(&self, battle_id: &BattleId, players: Vec<Player>) -> Result<bool>;

    /// Number of registered players
    fn player_count(&self) -> Result<usize>;

    /// Number of recorded battles
    fn battle_count(&self) -> Result<usize>;
}

/// Order players for the leaderboard: rating descending, then oldest first
pub(crate) fn sort_by_ranking(players: &mut [Player]) {
    players.sort_by(|a, b| {
        b.rating
            .cmp(&a.rating)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Order battles newest first
pub(crate) fn sort_by_recency(battles: &mut [Battle]) {
    battles.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}
