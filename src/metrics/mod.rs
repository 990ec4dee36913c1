//! Metrics and monitoring for the battle-ranks service

pub mod collector;

pub use collector::{MetricsCollector, MetricsTimer, RankingMetrics};
