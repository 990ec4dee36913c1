//! Utility functions for the ranking service

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique player or battle ID
pub fn generate_id() -> Uuid {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Win percentage in the range 0..=100, zero when nothing has been played
pub fn win_rate(wins: u32, losses: u32) -> f64 {
    let total = wins + losses;
    if total == 0 {
        return 0.0;
    }
    wins as f64 / total as f64 * 100.0
}

/// Default match format label, e.g. "2v1"
pub fn match_format_label(team_a_size: usize, team_b_size: usize) -> String {
    format!("{}v{}", team_a_size, team_b_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_unique_ids() {
        let id1 = generate_id();
        let id2 = generate_id();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_win_rate() {
        assert_eq!(win_rate(0, 0), 0.0);
        assert_eq!(win_rate(1, 1), 50.0);
        assert_eq!(win_rate(4, 0), 100.0);
        assert_eq!(win_rate(0, 3), 0.0);
    }

    #[test]
    fn test_match_format_label() {
        assert_eq!(match_format_label(1, 1), "1v1");
        assert_eq!(match_format_label(2, 3), "2v3");
    }
}
