//! Main application state and service coordination
//!
//! `AppState` owns the store, the ranking service and the metrics
//! collector for the lifetime of the process. It is built once in `main`
//! and shared with the HTTP layer.

use crate::config::AppConfig;
use crate::metrics::MetricsCollector;
use crate::rating::TeamEloCalculator;
use crate::service::ranking::RankingService;
use crate::storage::{InMemoryStorage, RankingStorage};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

/// Service-level errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Service initialization error: {message}")]
    Initialization { message: String },
}

/// Main application state containing all service components
pub struct AppState {
    /// Application configuration
    config: AppConfig,

    /// Player and battle store
    storage: Arc<dyn RankingStorage>,

    /// Rating engine front end
    ranking: Arc<RankingService>,

    /// Metrics collector for monitoring
    metrics: Arc<MetricsCollector>,

    /// Service status
    is_running: Arc<RwLock<bool>>,
}

impl AppState {
    /// Initialize the application with the in-memory store
    pub async fn new(config: AppConfig) -> Result<Self, ServiceError> {
        Self::with_storage(config, Arc::new(InMemoryStorage::new())).await
    }

    /// Initialize the application around an existing store
    pub async fn with_storage(
        config: AppConfig,
        storage: Arc<dyn RankingStorage>,
    ) -> Result<Self, ServiceError> {
        info!("Initializing battle-ranks service");

        crate::config::validate_config(&config).map_err(|e| ServiceError::Configuration {
            message: e.to_string(),
        })?;

        let metrics = Arc::new(
            MetricsCollector::new().map_err(|e| ServiceError::Initialization {
                message: format!("Failed to create metrics collector: {}", e),
            })?,
        );

        let ranking = Arc::new(
            RankingService::new(
                storage.clone(),
                Arc::new(TeamEloCalculator::new()),
                config.rating.clone(),
            )
            .with_metrics(metrics.clone()),
        );

        info!(
            "Rating engine ready - default rating: {}, starting range: {}..={}",
            config.rating.default_rating,
            config.rating.min_starting_rating,
            config.rating.max_starting_rating
        );

        Ok(Self {
            config,
            storage,
            ranking,
            metrics,
            is_running: Arc::new(RwLock::new(false)),
        })
    }

    /// Mark the service as accepting requests
    pub async fn start(&self) {
        *self.is_running.write().await = true;
        self.metrics.update_health_status(2);
        info!("✅ Battle-ranks service started");
    }

    /// Mark the service as stopped
    pub async fn shutdown(&self) {
        *self.is_running.write().await = false;
        self.metrics.update_health_status(0);

        match (self.storage.player_count(), self.storage.battle_count()) {
            (Ok(players), Ok(battles)) => info!(
                "Final state: {} players, {} battles recorded",
                players, battles
            ),
            _ => info!("Final state unavailable"),
        }
        info!("✅ Battle-ranks service shutdown completed");
    }

    /// Get service configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Check if service is running
    pub async fn is_running(&self) -> bool {
        *self.is_running.read().await
    }

    /// Get the ranking service
    pub fn ranking(&self) -> Arc<RankingService> {
        self.ranking.clone()
    }

    /// Get the underlying store
    pub fn storage(&self) -> Arc<dyn RankingStorage> {
        self.storage.clone()
    }

    /// Get the metrics collector
    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.metrics.clone()
    }
}
