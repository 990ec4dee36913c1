//! Performance benchmarks for rating calculations

use battle_ranks::config::RatingConfig;
use battle_ranks::rating::{compute_rating_deltas, RatingCalculator, TeamEloCalculator};
use battle_ranks::storage::InMemoryStorage;
use battle_ranks::types::{NewBattle, NewPlayer, PlayerId, Team};
use battle_ranks::RankingService;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use uuid::Uuid;

fn roster(size: usize, base_rating: i32) -> Vec<(PlayerId, i32)> {
    (0..size)
        .map(|i| (Uuid::new_v4(), base_rating + (i as i32 * 25)))
        .collect()
}

fn bench_rating_calculations(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_rating_deltas");

    for size in [1usize, 3, 5, 10] {
        let team_a = roster(size, 1200);
        let team_b = roster(size, 1350);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(compute_rating_deltas(&team_a, &team_b, Team::A)))
        });
    }

    group.finish();
}

fn bench_win_probability(c: &mut Criterion) {
    let calculator = TeamEloCalculator::new();
    let team_a = vec![1500, 1600, 1400, 1550];
    let team_b = vec![1450, 1500, 1525, 1480];

    c.bench_function("win_probability_4v4", |b| {
        b.iter(|| black_box(calculator.win_probability(&team_a, &team_b)))
    });
}

fn bench_record_and_delete_battle(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let service = RankingService::new(
        Arc::new(InMemoryStorage::new()),
        Arc::new(TeamEloCalculator::new()),
        RatingConfig::default(),
    );

    let players: Vec<PlayerId> = rt.block_on(async {
        let mut ids = Vec::new();
        for i in 0..6 {
            let player = service
                .create_player(NewPlayer {
                    name: format!("bench_player_{}", i),
                    rating: Some(1200 + i * 40),
                })
                .await
                .unwrap();
            ids.push(player.id);
        }
        ids
    });

    c.bench_function("record_and_delete_battle_3v3", |b| {
        b.iter(|| {
            rt.block_on(async {
                let battle = service
                    .record_battle(NewBattle {
                        team_a: players[..3].to_vec(),
                        team_b: players[3..].to_vec(),
                        winning_team: "A".to_string(),
                        match_format: String::new(),
                        note: None,
                    })
                    .await
                    .unwrap();

                black_box(service.delete_battle(battle.id).await.unwrap())
            })
        })
    });
}

criterion_group!(
    benches,
    bench_rating_calculations,
    bench_win_probability,
    bench_record_and_delete_battle
);
criterion_main!(benches);
