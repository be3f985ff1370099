//! Test fixtures and builders for integration testing

use ready_room::config::AppConfig;
use ready_room::matchmaking::controller::{Matchmaker, MatchmakerConfig};
use ready_room::types::{Match, Player};
use std::time::Duration;

/// Build a player with an explicit arrival time in whole seconds
pub fn create_test_player(id: u64, rating: i32, net_wins: i32, secs: u64) -> Player {
    Player::new(id, rating, net_wins, Duration::from_secs(secs))
}

/// A matchmaker with the default greedy policy and spread limit
pub fn create_test_matchmaker() -> Matchmaker {
    Matchmaker::new(MatchmakerConfig::default())
}

/// A pool of players close enough in rating to always match, with ids
/// starting at `first_id`, arriving one second apart from `start_secs`
pub fn create_tight_pool(count: usize, first_id: u64, base_rating: i32, start_secs: u64) -> Vec<Player> {
    (0..count)
        .map(|i| {
            create_test_player(
                first_id + i as u64,
                base_rating + i as i32,
                (i as i32 % 7) - 3,
                start_secs + i as u64,
            )
        })
        .collect()
}

/// Admit every player in order, collecting each match as it commits
///
/// Panics on admission errors, which the callers never expect.
pub fn admit_all(matchmaker: &mut Matchmaker, players: Vec<Player>) -> Vec<Match> {
    let mut matches = Vec::new();
    for player in players {
        if let Some(matched) = matchmaker.admit(player).unwrap() {
            matches.push(matched);
        }
    }
    matches
}

/// A seeded config so simulation-based tests are reproducible
pub fn create_seeded_config(seed: u64) -> AppConfig {
    let mut config = AppConfig::default();
    config.simulation.seed = Some(seed);
    config
}
