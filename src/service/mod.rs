//! Service layer for the battle-ranks service
//!
//! This module contains the ranking service, the application state that
//! owns it, and health checks.

pub mod app;
pub mod health;
pub mod ranking;

pub use app::{AppState, ServiceError};
pub use health::{HealthCheck, HealthStatus};
pub use ranking::RankingService;
