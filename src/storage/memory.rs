//! In-memory storage backend
//!
//! Players and battles live behind a single lock so that a battle commit or
//! revert touches both collections in one write.

use crate::error::{RankingError, Result};
use crate::storage::{sort_by_ranking, sort_by_recency, RankingStorage};
use crate::types::{Battle, BattleId, Player, PlayerId};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

#[derive(Debug, Default)]
struct StoreState {
    players: HashMap<PlayerId, Player>,
    battles: HashMap<BattleId, Battle>,
}

/// In-memory ranking storage implementation
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    state: RwLock<StoreState>,
}

impl InMemoryStorage {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|_| RankingError::internal("Failed to acquire storage read lock"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|_| RankingError::internal("Failed to acquire storage write lock"))
    }
}

impl RankingStorage for InMemoryStorage {
    fn get_player(&self, player_id: &PlayerId) -> Result<Option<Player>> {
        Ok(self.read()?.players.get(player_id).cloned())
    }

    fn get_player_by_name(&self, name: &str) -> Result<Option<Player>> {
        Ok(self
            .read()?
            .players
            .values()
            .find(|player| player.name == name)
            .cloned())
    }

    fn get_players(&self, player_ids: &[PlayerId]) -> Result<HashMap<PlayerId, Player>> {
        let state = self.read()?;

        let mut result = HashMap::new();
        for player_id in player_ids {
            if let Some(player) = state.players.get(player_id) {
                result.insert(*player_id, player.clone());
            }
        }

        Ok(result)
    }

    fn list_players(&self) -> Result<Vec<Player>> {
        let mut players: Vec<Player> = self.read()?.players.values().cloned().collect();
        sort_by_ranking(&mut players);
        Ok(players)
    }

    fn create_player(&self, player: Player) -> Result<()> {
        let mut state = self.write()?;

        if state.players.contains_key(&player.id) {
            return Err(RankingError::Conflict {
                message: format!("Player id {} already exists", player.id),
            });
        }
        if state.players.values().any(|p| p.name == player.name) {
            return Err(RankingError::Conflict {
                message: format!("Player name '{}' already exists", player.name),
            });
        }

        state.players.insert(player.id, player);
        Ok(())
    }

    fn delete_player(&self, player_id: &PlayerId) -> Result<bool> {
        Ok(self.write()?.players.remove(player_id).is_some())
    }

    fn get_battle(&self, battle_id: &BattleId) -> Result<Option<Battle>> {
        Ok(self.read()?.battles.get(battle_id).cloned())
    }

    fn list_battles(&self) -> Result<Vec<Battle>> {
        let mut battles: Vec<Battle> = self.read()?.battles.values().cloned().collect();
        sort_by_recency(&mut battles);
        Ok(battles)
    }

    fn commit_battle(&self, battle: Battle, players: Vec<Player>) -> Result<()> {
        let mut state = self.write()?;

        // Check everything before writing anything
        if state.battles.contains_key(&battle.id) {
            return Err(RankingError::Conflict {
                message: format!("Battle id {} already exists", battle.id),
            });
        }
        if let Some(missing) = players
            .iter()
            .find(|player| !state.players.contains_key(&player.id))
        {
            return Err(RankingError::PlayerNotFound {
                player_id: missing.id,
            });
        }

        debug!(
            "Committing battle {} with {} player updates",
            battle.id,
            players.len()
        );

        for player in players {
            state.players.insert(player.id, player);
        }
        state.battles.insert(battle.id, battle);

        Ok(())
    }

    fn revert_battle(&self, battle_id: &BattleId, players: Vec<Player>) -> Result<bool> {
        let mut state = self.write()?;

        if !state.battles.contains_key(battle_id) {
            return Ok(false);
        }

        debug!(
            "Reverting battle {} with {} player updates",
            battle_id,
            players.len()
        );

        // Players deleted since the battle are not resurrected
        for player in players {
            if let Some(existing) = state.players.get_mut(&player.id) {
                *existing = player;
            }
        }
        state.battles.remove(battle_id);

        Ok(true)
    }

    fn player_count(&self) -> Result<usize> {
        Ok(self.read()?.players.len())
    }

    fn battle_count(&self) -> Result<usize> {
        Ok(self.read()?.battles.len())
    }
}
