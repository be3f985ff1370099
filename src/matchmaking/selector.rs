//! Candidate selection over the rating-sorted player pool
//!
//! This module finds every group of players close enough in skill to form a
//! match, by sliding a fixed-size window over the pool in rating order.

use tracing::debug;

use crate::types::{Player, MATCH_SIZE};
use crate::utils::rating_spread;

/// A contiguous window of players in rating-sorted order
///
/// Transient: windows are produced fresh on every evaluation pass and share
/// no state with the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateWindow {
    /// Position of the window's first player in the rating-sorted pool
    pub start: usize,
    /// The window's players, still in rating-sorted order
    pub players: Vec<Player>,
}

impl CandidateWindow {
    /// Highest minus lowest rating inside the window
    pub fn spread(&self) -> i32 {
        rating_spread(&self.players)
    }
}

/// Sliding-window candidate selector
///
/// Sorts the pool by rating (ties broken by player id so equal ratings order
/// the same way every pass) and accepts each window of `window_size`
/// consecutive players whose rating spread stays within the limit. All
/// accepted windows are returned, overlaps included, ordered by start index.
///
/// Only groups contiguous in the sorted order are considered; a cheaper
/// non-contiguous group that skips over an outlier will not be proposed.
#[derive(Debug, Clone)]
pub struct WindowSelector {
    window_size: usize,
}

impl WindowSelector {
    pub fn new() -> Self {
        Self {
            window_size: MATCH_SIZE,
        }
    }

    pub fn with_window_size(window_size: usize) -> Self {
        Self { window_size }
    }

    /// Return every window of the pool whose rating spread is at most
    /// `max_spread`, in ascending start order
    pub fn select(&self, pool: &[Player], max_spread: i32) -> Vec<CandidateWindow> {
        if self.window_size == 0 || pool.len() < self.window_size {
            return Vec::new();
        }

        let mut sorted: Vec<Player> = pool.to_vec();
        sorted.sort_by_key(|p| (p.rating, p.id));

        let mut windows = Vec::new();
        for start in 0..=(sorted.len() - self.window_size) {
            let slice = &sorted[start..start + self.window_size];
            // Sorted order makes the spread a single subtraction
            let spread = slice[self.window_size - 1].rating - slice[0].rating;
            if spread <= max_spread {
                windows.push(CandidateWindow {
                    start,
                    players: slice.to_vec(),
                });
            }
        }

        debug!(
            "Selected {} candidate window(s) from pool of {} players (max spread {})",
            windows.len(),
            pool.len(),
            max_spread
        );

        windows
    }
}

impl Default for WindowSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn create_test_player(id: u64, rating: i32) -> Player {
        Player::new(id, rating, 0, Duration::ZERO)
    }

    #[test]
    fn test_pool_smaller_than_window_yields_nothing() {
        let selector = WindowSelector::new();
        let pool: Vec<Player> = (1..=9).map(|i| create_test_player(i, 1500)).collect();

        assert!(selector.select(&pool, 200).is_empty());
        assert!(selector.select(&[], 200).is_empty());
    }

    #[test]
    fn test_single_window_within_spread() {
        let selector = WindowSelector::new();
        // Ratings 1700, 1710, ..., 1790: spread 90
        let pool: Vec<Player> = (0..10)
            .map(|i| create_test_player(i + 1, 1700 + (i as i32) * 10))
            .collect();

        let windows = selector.select(&pool, 200);
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].start, 0);
        assert_eq!(windows[0].spread(), 90);
    }

    #[test]
    fn test_window_exceeding_spread_is_rejected() {
        let selector = WindowSelector::new();
        // Spread 900, well past the limit
        let pool: Vec<Player> = (0..10)
            .map(|i| create_test_player(i + 1, 1000 + (i as i32) * 100))
            .collect();

        assert!(selector.select(&pool, 200).is_empty());
    }

    #[test]
    fn test_spread_exactly_at_limit_is_accepted() {
        let selector = WindowSelector::new();
        // First nine at 1500, tenth at 1700: spread exactly 200
        let mut pool: Vec<Player> = (1..=9).map(|i| create_test_player(i, 1500)).collect();
        pool.push(create_test_player(10, 1700));

        let windows = selector.select(&pool, 200);
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].spread(), 200);
    }

    #[test]
    fn test_overlapping_windows_all_returned() {
        let selector = WindowSelector::new();
        // Ratings 1000, 1010, ..., 1110: every 10-window has spread 90
        let pool: Vec<Player> = (0..12)
            .map(|i| create_test_player(i + 1, 1000 + (i as i32) * 10))
            .collect();

        let windows = selector.select(&pool, 200);
        assert_eq!(windows.len(), 3);
        assert_eq!(
            windows.iter().map(|w| w.start).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_rating_gap_blocks_every_window() {
        let selector = WindowSelector::new();
        // Two tight clusters of six, 500 apart: every 10-window spans the gap
        let mut pool: Vec<Player> = (0..6)
            .map(|i| create_test_player(i + 1, 1200 + i as i32))
            .collect();
        pool.extend((0..6).map(|i| create_test_player(i + 7, 1700 + i as i32)));

        assert!(selector.select(&pool, 200).is_empty());
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let selector = WindowSelector::new();
        let pool: Vec<Player> = (0..10)
            .map(|i| create_test_player(i + 1, 1700 + (i as i32) * 10))
            .collect();
        let mut shuffled = pool.clone();
        shuffled.reverse();
        shuffled.swap(2, 7);

        assert_eq!(selector.select(&pool, 200), selector.select(&shuffled, 200));
    }

    #[test]
    fn test_equal_ratings_order_by_id() {
        let selector = WindowSelector::new();
        // All equal ratings, ids supplied out of order
        let ids = [7u64, 3, 9, 1, 5, 10, 2, 8, 4, 6];
        let pool: Vec<Player> = ids.iter().map(|&id| create_test_player(id, 1500)).collect();

        let windows = selector.select(&pool, 0);
        assert_eq!(windows.len(), 1);
        let window_ids: Vec<u64> = windows[0].players.iter().map(|p| p.id).collect();
        assert_eq!(window_ids, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_zero_spread_requires_equal_ratings() {
        let selector = WindowSelector::new();
        let mut pool: Vec<Player> = (1..=10).map(|i| create_test_player(i, 1500)).collect();

        assert_eq!(selector.select(&pool, 0).len(), 1);

        pool[9].rating = 1501;
        assert!(selector.select(&pool, 0).is_empty());
    }

    #[test]
    fn test_custom_window_size() {
        let selector = WindowSelector::with_window_size(4);
        let pool: Vec<Player> = (0..6)
            .map(|i| create_test_player(i + 1, 1500 + (i as i32) * 10))
            .collect();

        let windows = selector.select(&pool, 100);
        assert_eq!(windows.len(), 3);
        assert!(windows.iter().all(|w| w.players.len() == 4));
    }
}
