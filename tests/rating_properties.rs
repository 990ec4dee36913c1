//! Property tests for the team Elo update law and battle reversal

use battle_ranks::rating::elo::{expected_score, per_player_delta, team_deltas};
use battle_ranks::rating::{compute_rating_deltas, ledger};
use battle_ranks::types::{Battle, Player, PlayerId, Team};
use chrono::Utc;
use proptest::prelude::*;
use uuid::Uuid;

fn team_strategy() -> impl Strategy<Value = Team> {
    prop_oneof![Just(Team::A), Just(Team::B)]
}

fn roster_strategy() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(100i32..=3000, 1..=3)
}

fn with_ids(ratings: &[i32]) -> Vec<(PlayerId, i32)> {
    ratings.iter().map(|&rating| (Uuid::new_v4(), rating)).collect()
}

proptest! {
    #[test]
    fn expected_scores_are_complementary(a in 100.0f64..3000.0, b in 100.0f64..3000.0) {
        let forward = expected_score(a, b);
        let backward = expected_score(b, a);

        prop_assert!(forward > 0.0 && forward < 1.0);
        prop_assert!((forward + backward - 1.0).abs() < 1e-9);
    }

    #[test]
    fn team_deltas_are_zero_sum(a in 100.0f64..9000.0, b in 100.0f64..9000.0, winner in team_strategy()) {
        let deltas = team_deltas(a, b, winner);

        prop_assert_eq!(deltas.team_a + deltas.team_b, 0.0);
        prop_assert!(deltas.for_team(winner) >= 0.0);
        prop_assert!(deltas.for_team(winner) <= 32.0);
    }

    #[test]
    fn teammates_share_one_delta(
        team_a in roster_strategy(),
        team_b in roster_strategy(),
        winner in team_strategy(),
    ) {
        let roster_a = with_ids(&team_a);
        let roster_b = with_ids(&team_b);
        let deltas = compute_rating_deltas(&roster_a, &roster_b, winner).unwrap();

        prop_assert_eq!(deltas.len(), roster_a.len() + roster_b.len());

        let a_values: Vec<i32> = roster_a.iter().map(|(id, _)| deltas[id]).collect();
        let b_values: Vec<i32> = roster_b.iter().map(|(id, _)| deltas[id]).collect();
        prop_assert!(a_values.windows(2).all(|pair| pair[0] == pair[1]));
        prop_assert!(b_values.windows(2).all(|pair| pair[0] == pair[1]));

        // Winners never lose rating and losers never gain
        let (winning, losing) = match winner {
            Team::A => (a_values[0], b_values[0]),
            Team::B => (b_values[0], a_values[0]),
        };
        prop_assert!(winning >= 0);
        prop_assert!(losing <= 0);
    }

    #[test]
    fn swapping_sides_mirrors_deltas(
        team_a in roster_strategy(),
        team_b in roster_strategy(),
        winner in team_strategy(),
    ) {
        let roster_a = with_ids(&team_a);
        let roster_b = with_ids(&team_b);

        let forward = compute_rating_deltas(&roster_a, &roster_b, winner).unwrap();
        let mirrored = compute_rating_deltas(&roster_b, &roster_a, winner.opponent()).unwrap();

        prop_assert_eq!(forward, mirrored);
    }

    #[test]
    fn rounding_is_symmetric(delta in -32.0f64..32.0, size in 1usize..=5) {
        prop_assert_eq!(per_player_delta(-delta, size), -per_player_delta(delta, size));
    }

    #[test]
    fn apply_then_revert_is_identity(
        team_a in roster_strategy(),
        team_b in roster_strategy(),
        winner in team_strategy(),
        prior_wins in 0u32..50,
        prior_losses in 0u32..50,
    ) {
        let players: Vec<Player> = team_a
            .iter()
            .chain(team_b.iter())
            .enumerate()
            .map(|(i, &rating)| {
                let mut player = Player::new(format!("player_{}", i), rating);
                player.wins = prior_wins;
                player.losses = prior_losses;
                player
            })
            .collect();

        let (side_a, side_b) = players.split_at(team_a.len());
        let roster_a: Vec<(PlayerId, i32)> = side_a.iter().map(|p| (p.id, p.rating)).collect();
        let roster_b: Vec<(PlayerId, i32)> = side_b.iter().map(|p| (p.id, p.rating)).collect();

        let battle = Battle {
            id: Uuid::new_v4(),
            team_a: roster_a.iter().map(|(id, _)| *id).collect(),
            team_b: roster_b.iter().map(|(id, _)| *id).collect(),
            winning_team: winner,
            rating_deltas: compute_rating_deltas(&roster_a, &roster_b, winner).unwrap(),
            match_format: format!("{}v{}", roster_a.len(), roster_b.len()),
            note: None,
            created_at: Utc::now(),
        };

        let updated = ledger::apply_battle(&players, &battle).unwrap();
        for (before, after) in players.iter().zip(&updated) {
            prop_assert_eq!(after.battles_played(), before.battles_played() + 1);
            prop_assert_eq!(after.last_battle, Some(battle.created_at));
        }

        for (original, mut player) in players.iter().zip(updated) {
            ledger::revert_from_player(&mut player, &battle, original.last_battle).unwrap();
            prop_assert_eq!(&player, original);
        }
    }
}
