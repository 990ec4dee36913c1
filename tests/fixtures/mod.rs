//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use battle_ranks::config::{AppConfig, RatingConfig};
use battle_ranks::rating::TeamEloCalculator;
use battle_ranks::service::AppState;
use battle_ranks::storage::InMemoryStorage;
use battle_ranks::types::{NewBattle, NewPlayer, Player, PlayerId};
use battle_ranks::RankingService;
use std::sync::Arc;

/// Ranking service over a fresh in-memory store
pub fn create_test_service() -> RankingService {
    RankingService::new(
        Arc::new(InMemoryStorage::new()),
        Arc::new(TeamEloCalculator::new()),
        RatingConfig::default(),
    )
}

/// Running application state with default configuration
pub async fn create_running_state() -> Arc<AppState> {
    let state = Arc::new(
        AppState::new(AppConfig::default())
            .await
            .expect("default config is valid"),
    );
    state.start().await;
    state
}

/// Register one player with an explicit starting rating
pub async fn add_player(service: &RankingService, name: &str, rating: i32) -> Player {
    service
        .create_player(NewPlayer {
            name: name.to_string(),
            rating: Some(rating),
        })
        .await
        .expect("player creation succeeds")
}

/// Register `count` players named `{prefix}_{i}`, all at `rating`
pub async fn add_players(
    service: &RankingService,
    prefix: &str,
    count: usize,
    rating: i32,
) -> Vec<Player> {
    let mut players = Vec::with_capacity(count);
    for i in 0..count {
        players.push(add_player(service, &format!("{}_{}", prefix, i), rating).await);
    }
    players
}

/// Battle request from two rosters and a winner tag
pub fn battle_request(team_a: &[PlayerId], team_b: &[PlayerId], winner: &str) -> NewBattle {
    NewBattle {
        team_a: team_a.to_vec(),
        team_b: team_b.to_vec(),
        winning_team: winner.to_string(),
        match_format: String::new(),
        note: None,
    }
}

/// Ids of the given players, in order
pub fn ids(players: &[Player]) -> Vec<PlayerId> {
    players.iter().map(|player| player.id).collect()
}

/// Current state of every given player, re-read from the service
pub async fn snapshot(service: &RankingService, players: &[Player]) -> Vec<Player> {
    let mut current = Vec::with_capacity(players.len());
    for player in players {
        current.push(
            service
                .get_player(player.id)
                .await
                .expect("player still exists"),
        );
    }
    current
}
