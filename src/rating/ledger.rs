//! Applying and reversing a battle on player records
//!
//! Reversal always works from the deltas stored on the battle, never from a
//! recomputation, so apply followed by revert is exact integer arithmetic.

use crate::error::{RankingError, Result};
use crate::types::{Battle, Player};
use chrono::{DateTime, Utc};

/// Apply one battle's outcome to a participant
pub fn apply_to_player(player: &mut Player, battle: &Battle, at: DateTime<Utc>) -> Result<()> {
    let delta = stored_delta(player, battle)?;

    player.rating = player.rating.checked_add(delta).ok_or_else(|| {
        RankingError::internal(format!("Rating overflow for player {}", player.id))
    })?;

    if battle.is_winner(&player.id) {
        player.wins += 1;
    } else {
        player.losses += 1;
    }
    player.last_battle = Some(at);

    Ok(())
}

/// Undo one battle's outcome on a participant
///
/// `previous_battle_at` is the time of the player's latest other battle,
/// which becomes their last battle time again.
pub fn revert_from_player(
    player: &mut Player,
    battle: &Battle,
    previous_battle_at: Option<DateTime<Utc>>,
) -> Result<()> {
    let delta = stored_delta(player, battle)?;
    let player_id = player.id;

    let rating = player.rating.checked_sub(delta).ok_or_else(|| {
        RankingError::internal(format!("Rating overflow for player {}", player_id))
    })?;

    let counter = if battle.is_winner(&player.id) {
        &mut player.wins
    } else {
        &mut player.losses
    };
    *counter = counter.checked_sub(1).ok_or_else(|| {
        RankingError::internal(format!(
            "Win/loss counter underflow reverting battle {} for player {}",
            battle.id, player_id
        ))
    })?;

    player.rating = rating;
    player.last_battle = previous_battle_at;

    Ok(())
}

/// Apply a battle to every participant, returning the updated records
///
/// Nothing is returned unless every participant could be updated.
pub fn apply_battle(players: &[Player], battle: &Battle) -> Result<Vec<Player>> {
    players
        .iter()
        .map(|player| {
            let mut updated = player.clone();
            apply_to_player(&mut updated, battle, battle.created_at)?;
            Ok(updated)
        })
        .collect()
}

fn stored_delta(player: &Player, battle: &Battle) -> Result<i32> {
    if battle.team_of(&player.id).is_none() {
        return Err(RankingError::internal(format!(
            "Player {} did not take part in battle {}",
            player.id, battle.id
        )));
    }

    battle
        .rating_deltas
        .get(&player.id)
        .copied()
        .ok_or_else(|| {
            RankingError::internal(format!(
                "Battle {} has no stored delta for player {}",
                battle.id, player.id
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RatingDeltas, Team};
    use uuid::Uuid;

    fn battle_between(a: &Player, b: &Player, winner: Team, delta_a: i32, delta_b: i32) -> Battle {
        let mut rating_deltas = RatingDeltas::new();
        rating_deltas.insert(a.id, delta_a);
        rating_deltas.insert(b.id, delta_b);
        Battle {
            id: Uuid::new_v4(),
            team_a: vec![a.id],
            team_b: vec![b.id],
            winning_team: winner,
            rating_deltas,
            match_format: "1v1".to_string(),
            note: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_apply_updates_rating_and_counters() {
        let a = Player::new("alice", 1200);
        let b = Player::new("bob", 1200);
        let battle = battle_between(&a, &b, Team::A, 16, -16);

        let updated = apply_battle(&[a.clone(), b.clone()], &battle).unwrap();

        assert_eq!(updated[0].rating, 1216);
        assert_eq!((updated[0].wins, updated[0].losses), (1, 0));
        assert_eq!(updated[1].rating, 1184);
        assert_eq!((updated[1].wins, updated[1].losses), (0, 1));
        assert_eq!(updated[0].last_battle, Some(battle.created_at));
    }

    #[test]
    fn test_revert_restores_exact_state() {
        let a = Player::new("alice", 1337);
        let b = Player::new("bob", 998);
        let battle = battle_between(&a, &b, Team::B, -27, 27);

        let mut updated = apply_battle(&[a.clone(), b.clone()], &battle).unwrap();
        for player in updated.iter_mut() {
            revert_from_player(player, &battle, None).unwrap();
        }

        assert_eq!(updated[0], a);
        assert_eq!(updated[1], b);
    }

    #[test]
    fn test_revert_restores_previous_battle_time() {
        let a = Player::new("alice", 1200);
        let b = Player::new("bob", 1200);
        let battle = battle_between(&a, &b, Team::A, 16, -16);
        let earlier = battle.created_at - chrono::Duration::hours(1);

        let mut player = a.clone();
        apply_to_player(&mut player, &battle, battle.created_at).unwrap();
        revert_from_player(&mut player, &battle, Some(earlier)).unwrap();

        assert_eq!(player.last_battle, Some(earlier));
        assert_eq!(player.rating, 1200);
    }

    #[test]
    fn test_revert_refuses_counter_underflow() {
        let a = Player::new("alice", 1200);
        let b = Player::new("bob", 1200);
        let battle = battle_between(&a, &b, Team::A, 16, -16);

        let mut untouched = a.clone();
        let result = revert_from_player(&mut untouched, &battle, None);

        assert!(matches!(result, Err(RankingError::Internal { .. })));
        assert_eq!(untouched, a);
    }

    #[test]
    fn test_non_participant_rejected() {
        let a = Player::new("alice", 1200);
        let b = Player::new("bob", 1200);
        let outsider = Player::new("carol", 1200);
        let battle = battle_between(&a, &b, Team::A, 16, -16);

        let result = apply_battle(&[a, outsider], &battle);
        assert!(result.is_err());
    }
}
