//! Rating system configuration

use crate::error::{RankingError, Result};
use serde::{Deserialize, Serialize};

/// Starting-rating policy for new players
///
/// The K-factor is not configurable; see [`crate::rating::K_FACTOR`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Rating given to players registered without one
    pub default_rating: i32,
    /// Lowest starting rating a caller may request
    pub min_starting_rating: i32,
    /// Highest starting rating a caller may request
    pub max_starting_rating: i32,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            default_rating: 1200,
            min_starting_rating: 100,
            max_starting_rating: 3000,
        }
    }
}

impl RatingConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.min_starting_rating > self.max_starting_rating {
            return Err(RankingError::Configuration {
                message: format!(
                    "Minimum starting rating {} exceeds maximum {}",
                    self.min_starting_rating, self.max_starting_rating
                ),
            });
        }

        if !self.accepts_starting_rating(self.default_rating) {
            return Err(RankingError::Configuration {
                message: format!(
                    "Default rating {} outside allowed range {}..={}",
                    self.default_rating, self.min_starting_rating, self.max_starting_rating
                ),
            });
        }

        Ok(())
    }

    /// True when a caller-supplied starting rating is within bounds
    pub fn accepts_starting_rating(&self, rating: i32) -> bool {
        (self.min_starting_rating..=self.max_starting_rating).contains(&rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rating_config() {
        let config = RatingConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.accepts_starting_rating(100));
        assert!(config.accepts_starting_rating(3000));
        assert!(!config.accepts_starting_rating(99));
        assert!(!config.accepts_starting_rating(3001));
    }

    #[test]
    fn test_default_outside_range_rejected() {
        let config = RatingConfig {
            default_rating: 50,
            ..RatingConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RankingError::Configuration { .. })
        ));
    }
}
