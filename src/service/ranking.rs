//! Ranking service: players, battles and the leaderboard
//!
//! Every operation that reads ratings and writes them back runs under one
//! write gate, so two battles sharing a player can never both start from
//! the same stale rating.

use crate::config::RatingConfig;
use crate::error::{RankingError, Result};
use crate::metrics::{MetricsCollector, MetricsTimer};
use crate::rating::elo::{team_rating, validate_rosters};
use crate::rating::ledger;
use crate::rating::RatingCalculator;
use crate::storage::RankingStorage;
use crate::types::{
    Battle, BattleId, BattlePreview, NewBattle, NewPlayer, Player, PlayerId, PlayerStanding,
    PreviewRequest, Statistics, Team,
};
use crate::utils::{current_timestamp, generate_id, match_format_label};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Coordinates the rating engine with the injected store
pub struct RankingService {
    storage: Arc<dyn RankingStorage>,
    calculator: Arc<dyn RatingCalculator>,
    config: RatingConfig,
    write_gate: Mutex<()>,
    metrics: Option<Arc<MetricsCollector>>,
}

impl RankingService {
    /// Create a new ranking service
    pub fn new(
        storage: Arc<dyn RankingStorage>,
        calculator: Arc<dyn RatingCalculator>,
        config: RatingConfig,
    ) -> Self {
        Self {
            storage,
            calculator,
            config,
            write_gate: Mutex::new(()),
            metrics: None,
        }
    }

    /// Attach a metrics collector
    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Rating configuration in effect
    pub fn rating_config(&self) -> &RatingConfig {
        &self.config
    }

    /// Description of the active rating calculator
    pub fn calculator_config(&self) -> serde_json::Value {
        self.calculator.config()
    }

    /// Register a new player
    pub async fn create_player(&self, request: NewPlayer) -> Result<Player> {
        let result = self.create_player_inner(request).await;
        self.observe(&result);
        result
    }

    async fn create_player_inner(&self, request: NewPlayer) -> Result<Player> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(RankingError::validation("Player name cannot be empty"));
        }

        let rating = request.rating.unwrap_or(self.config.default_rating);
        if !self.config.accepts_starting_rating(rating) {
            return Err(RankingError::validation(format!(
                "Starting rating {} must be between {} and {}",
                rating, self.config.min_starting_rating, self.config.max_starting_rating
            )));
        }

        let _gate = self.write_gate.lock().await;

        if self.storage.get_player_by_name(name)?.is_some() {
            return Err(RankingError::Conflict {
                message: format!("Player name '{}' already exists", name),
            });
        }

        let player = Player::new(name, rating);
        self.storage.create_player(player.clone())?;

        info!(
            "Player created - id: {}, name: '{}', rating: {}",
            player.id, player.name, player.rating
        );
        self.refresh_player_gauge();

        Ok(player)
    }

    /// Look up one player
    pub async fn get_player(&self, player_id: PlayerId) -> Result<Player> {
        self.storage
            .get_player(&player_id)?
            .ok_or(RankingError::PlayerNotFound { player_id })
    }

    /// Remove a player; recorded battles keep referencing the id
    pub async fn delete_player(&self, player_id: PlayerId) -> Result<()> {
        let _gate = self.write_gate.lock().await;

        if !self.storage.delete_player(&player_id)? {
            let err = RankingError::PlayerNotFound { player_id };
            self.observe::<()>(&Err(err.clone()));
            return Err(err);
        }

        info!("Player deleted - id: {}", player_id);
        self.refresh_player_gauge();
        Ok(())
    }

    /// Leaderboard ordered by rating, highest first
    pub async fn list_rankings(&self) -> Result<Vec<PlayerStanding>> {
        let standings = self
            .storage
            .list_players()?
            .into_iter()
            .enumerate()
            .map(|(index, player)| PlayerStanding {
                rank: index + 1,
                win_rate: player.win_rate(),
                player,
            })
            .collect();

        Ok(standings)
    }

    /// Record a battle: validate, compute deltas, update every participant
    /// and store the record, all or nothing
    pub async fn record_battle(&self, request: NewBattle) -> Result<Battle> {
        let result = self.record_battle_inner(request).await;
        self.observe(&result);
        result
    }

    async fn record_battle_inner(&self, request: NewBattle) -> Result<Battle> {
        let winner: Team = request.winning_team.parse()?;
        validate_rosters(&request.team_a, &request.team_b)?;

        let timer = MetricsTimer::start();
        let _gate = self.write_gate.lock().await;

        let players = self.resolve_players(&request.team_a, &request.team_b)?;
        let team_a = rated_roster(&request.team_a, &players);
        let team_b = rated_roster(&request.team_b, &players);

        let rating_deltas = self.calculator.calculate_deltas(&team_a, &team_b, winner)?;

        let match_format = match request.match_format.trim() {
            "" => match_format_label(request.team_a.len(), request.team_b.len()),
            label => label.to_string(),
        };
        let note = request
            .note
            .map(|note| note.trim().to_string())
            .filter(|note| !note.is_empty());

        let battle = Battle {
            id: generate_id(),
            team_a: request.team_a,
            team_b: request.team_b,
            winning_team: winner,
            rating_deltas,
            match_format,
            note,
            created_at: current_timestamp(),
        };

        let participants: Vec<Player> = battle
            .participants()
            .filter_map(|id| players.get(id).cloned())
            .collect();
        let updated = ledger::apply_battle(&participants, &battle)?;

        self.storage.commit_battle(battle.clone(), updated)?;

        let elapsed = timer.stop();
        if let Some(metrics) = &self.metrics {
            metrics.record_battle_recorded(elapsed);
        }
        info!(
            "Battle recorded - id: {}, format: {}, winner: Team {}, participants: {}, max swing: {}, time: {:.2}ms",
            battle.id,
            battle.match_format,
            battle.winning_team,
            battle.rating_deltas.len(),
            battle.max_swing(),
            elapsed.as_secs_f64() * 1000.0
        );
        debug!("Battle {} deltas: {:?}", battle.id, battle.rating_deltas);

        Ok(battle)
    }

    /// Delete a battle and reverse its effect on every participant
    pub async fn delete_battle(&self, battle_id: BattleId) -> Result<Battle> {
        let result = self.delete_battle_inner(battle_id).await;
        self.observe(&result);
        result
    }

    async fn delete_battle_inner(&self, battle_id: BattleId) -> Result<Battle> {
        let _gate = self.write_gate.lock().await;

        let battle = self
            .storage
            .get_battle(&battle_id)?
            .ok_or(RankingError::BattleNotFound { battle_id })?;

        let ids: Vec<PlayerId> = battle.participants().copied().collect();
        let players = self.storage.get_players(&ids)?;
        let previous = self.previous_battle_times(&battle)?;

        let mut reverted = Vec::with_capacity(players.len());
        for player_id in &ids {
            let Some(player) = players.get(player_id) else {
                warn!(
                    "Player {} from battle {} no longer exists, skipping reversal",
                    player_id, battle.id
                );
                continue;
            };

            let mut player = player.clone();
            ledger::revert_from_player(&mut player, &battle, previous.get(player_id).copied())?;
            reverted.push(player);
        }

        if !self.storage.revert_battle(&battle.id, reverted)? {
            return Err(RankingError::BattleNotFound { battle_id });
        }

        if let Some(metrics) = &self.metrics {
            metrics.record_battle_reverted();
        }
        info!(
            "Battle reverted - id: {}, format: {}, participants: {}",
            battle.id,
            battle.match_format,
            battle.rating_deltas.len()
        );

        Ok(battle)
    }

    /// Look up one battle
    pub async fn get_battle(&self, battle_id: BattleId) -> Result<Battle> {
        self.storage
            .get_battle(&battle_id)?
            .ok_or(RankingError::BattleNotFound { battle_id })
    }

    /// All battles, newest first
    pub async fn list_battles(&self) -> Result<Vec<Battle>> {
        self.storage.list_battles()
    }

    /// The `limit` most recent battles
    pub async fn recent_battles(&self, limit: usize) -> Result<Vec<Battle>> {
        let mut battles = self.storage.list_battles()?;
        battles.truncate(limit);
        Ok(battles)
    }

    /// Predict a battle without recording it
    pub async fn preview_battle(&self, request: PreviewRequest) -> Result<BattlePreview> {
        validate_rosters(&request.team_a, &request.team_b)?;

        let players = self.resolve_players(&request.team_a, &request.team_b)?;
        let team_a = rated_roster(&request.team_a, &players);
        let team_b = rated_roster(&request.team_b, &players);

        let ratings_a: Vec<i32> = team_a.iter().map(|(_, rating)| *rating).collect();
        let ratings_b: Vec<i32> = team_b.iter().map(|(_, rating)| *rating).collect();
        let team_a_win_probability = self.calculator.win_probability(&ratings_a, &ratings_b);

        Ok(BattlePreview {
            team_a_rating: team_rating(&ratings_a),
            team_b_rating: team_rating(&ratings_b),
            team_a_win_probability,
            team_b_win_probability: 1.0 - team_a_win_probability,
            if_a_wins: self.calculator.calculate_deltas(&team_a, &team_b, Team::A)?,
            if_b_wins: self.calculator.calculate_deltas(&team_a, &team_b, Team::B)?,
        })
    }

    /// Leaderboard-wide totals
    pub async fn statistics(&self) -> Result<Statistics> {
        let players = self.storage.list_players()?;
        let battles = self.storage.list_battles()?;

        let mut match_formats = BTreeMap::new();
        for battle in &battles {
            *match_formats.entry(battle.match_format.clone()).or_insert(0) += 1;
        }

        Ok(Statistics {
            total_players: players.len(),
            total_battles: battles.len(),
            match_formats,
            top_player: players.first().map(|player| player.id),
        })
    }

    /// Fetch every rostered player, failing on the first unknown id
    fn resolve_players(
        &self,
        team_a: &[PlayerId],
        team_b: &[PlayerId],
    ) -> Result<HashMap<PlayerId, Player>> {
        let ids: Vec<PlayerId> = team_a.iter().chain(team_b.iter()).copied().collect();
        let players = self.storage.get_players(&ids)?;

        if let Some(missing) = ids.iter().find(|id| !players.contains_key(id)) {
            return Err(RankingError::PlayerNotFound {
                player_id: *missing,
            });
        }

        Ok(players)
    }

    /// Latest remaining battle time for each participant of `battle`
    fn previous_battle_times(&self, battle: &Battle) -> Result<HashMap<PlayerId, DateTime<Utc>>> {
        let mut latest: HashMap<PlayerId, DateTime<Utc>> = HashMap::new();

        for other in self.storage.list_battles()? {
            if other.id == battle.id {
                continue;
            }
            for player_id in other.participants() {
                if battle.team_of(player_id).is_none() {
                    continue;
                }
                latest
                    .entry(*player_id)
                    .and_modify(|at| *at = (*at).max(other.created_at))
                    .or_insert(other.created_at);
            }
        }

        Ok(latest)
    }

    fn refresh_player_gauge(&self) {
        if let Some(metrics) = &self.metrics {
            match self.storage.player_count() {
                Ok(count) => metrics.set_player_count(count),
                Err(e) => debug!("Failed to count players for metrics: {}", e),
            }
        }
    }

    fn observe<T>(&self, result: &Result<T>) {
        if let Err(e) = result {
            warn!("Request rejected - {}", e);
            if let Some(metrics) = &self.metrics {
                metrics.record_rejection(e.kind());
            }
        }
    }
}

fn rated_roster(ids: &[PlayerId], players: &HashMap<PlayerId, Player>) -> Vec<(PlayerId, i32)> {
    ids.iter()
        .filter_map(|id| players.get(id).map(|player| (*id, player.rating)))
        .collect()
}
