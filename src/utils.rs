//! Utility functions for the matchmaking engine

use std::time::Duration;

use crate::types::Player;

/// Convert fractional seconds into a `Duration`, clamping anything
/// negative or non-finite to zero
pub fn duration_from_secs_f64(secs: f64) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::from_secs_f64(secs)
    } else {
        Duration::ZERO
    }
}

/// Highest minus lowest rating across the given players, 0 when empty
pub fn rating_spread(players: &[Player]) -> i32 {
    let ratings = players.iter().map(|p| p.rating);
    match (ratings.clone().min(), ratings.max()) {
        (Some(min), Some(max)) => max - min,
        _ => 0,
    }
}

/// Sum of net wins across the given players, widened to avoid overflow
pub fn net_wins_sum(players: &[Player]) -> i64 {
    players.iter().map(|p| p.net_wins as i64).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: u64, rating: i32, net_wins: i32) -> Player {
        Player::new(id, rating, net_wins, Duration::ZERO)
    }

    #[test]
    fn test_duration_from_secs_f64_clamps() {
        assert_eq!(duration_from_secs_f64(1.5), Duration::from_millis(1500));
        assert_eq!(duration_from_secs_f64(0.0), Duration::ZERO);
        assert_eq!(duration_from_secs_f64(-3.0), Duration::ZERO);
        assert_eq!(duration_from_secs_f64(f64::NAN), Duration::ZERO);
    }

    #[test]
    fn test_rating_spread() {
        assert_eq!(rating_spread(&[]), 0);
        assert_eq!(rating_spread(&[player(1, 1500, 0)]), 0);
        assert_eq!(
            rating_spread(&[player(1, 1450, 0), player(2, 1700, 0), player(3, 1500, 0)]),
            250
        );
    }

    #[test]
    fn test_net_wins_sum() {
        assert_eq!(net_wins_sum(&[]), 0);
        assert_eq!(
            net_wins_sum(&[player(1, 1500, 7), player(2, 1500, -3), player(3, 1500, 1)]),
            5
        );
    }
}
