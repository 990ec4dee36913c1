//! Metrics collection using Prometheus
//!
//! This module provides metrics collection for the battle-ranks service
//! using Prometheus metrics.

use anyhow::Result;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main metrics collector for the ranking service
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Battle and player metrics
    ranking_metrics: RankingMetrics,

    /// Health check status (0=unhealthy, 1=degraded, 2=healthy)
    health_status: IntGauge,
}

/// Battle and player metrics
#[derive(Clone)]
pub struct RankingMetrics {
    /// Total battles recorded
    pub battles_recorded_total: IntCounter,

    /// Total battles deleted and reversed
    pub battles_reverted_total: IntCounter,

    /// Rejected operations by error kind
    pub rejected_requests_total: IntCounterVec,

    /// Registered players
    pub players: IntGauge,

    /// Time spent computing and committing a battle
    pub rating_calculation_duration: Histogram,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let ranking_metrics = RankingMetrics::new(&registry)?;

        let health_status = IntGauge::new(
            "battle_ranks_health_status",
            "Health status (0=unhealthy, 1=degraded, 2=healthy)",
        )?;
        registry.register(Box::new(health_status.clone()))?;

        Ok(Self {
            registry,
            ranking_metrics,
            health_status,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    /// Get battle and player metrics
    pub fn ranking(&self) -> &RankingMetrics {
        &self.ranking_metrics
    }

    /// Record a battle being committed
    pub fn record_battle_recorded(&self, duration: Duration) {
        self.ranking_metrics.battles_recorded_total.inc();
        self.ranking_metrics
            .rating_calculation_duration
            .observe(duration.as_secs_f64());
    }

    /// Record a battle being reversed
    pub fn record_battle_reverted(&self) {
        self.ranking_metrics.battles_reverted_total.inc();
    }

    /// Record an operation rejected with the given error kind
    pub fn record_rejection(&self, kind: &str) {
        self.ranking_metrics
            .rejected_requests_total
            .with_label_values(&[kind])
            .inc();
    }

    /// Update the registered player gauge
    pub fn set_player_count(&self, count: usize) {
        self.ranking_metrics.players.set(count as i64);
    }

    /// Update health status
    pub fn update_health_status(&self, status: u8) {
        self.health_status.set(status as i64);
    }

    /// Create a timer for measuring operation duration
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::start()
    }
}

/// Timer for measuring operation durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    /// Start timing now
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get the elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the duration
    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}

impl RankingMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let battles_recorded_total = IntCounter::new(
            "battle_ranks_battles_recorded_total",
            "Total battles recorded",
        )?;
        registry.register(Box::new(battles_recorded_total.clone()))?;

        let battles_reverted_total = IntCounter::new(
            "battle_ranks_battles_reverted_total",
            "Total battles deleted and reversed",
        )?;
        registry.register(Box::new(battles_reverted_total.clone()))?;

        let rejected_requests_total = IntCounterVec::new(
            Opts::new(
                "battle_ranks_rejected_requests_total",
                "Total rejected operations",
            ),
            &["reason"],
        )?;
        registry.register(Box::new(rejected_requests_total.clone()))?;

        let players = IntGauge::new("battle_ranks_players", "Number of registered players")?;
        registry.register(Box::new(players.clone()))?;

        let rating_calculation_duration = Histogram::with_opts(
            HistogramOpts::new(
                "battle_ranks_rating_calculation_duration_seconds",
                "Time spent computing and committing a battle",
            )
            .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1]),
        )?;
        registry.register(Box::new(rating_calculation_duration.clone()))?;

        Ok(Self {
            battles_recorded_total,
            battles_reverted_total,
            rejected_requests_total,
            players,
            rating_calculation_duration,
        })
    }
}
