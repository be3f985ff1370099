//! Synthetic player generation
//!
//! Arrival times are uniform over the run window; ratings and net wins are
//! uniform over their configured ranges. A fixed seed reproduces the exact
//! same population, and ids are assigned in arrival order starting at 1.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::SimulationSettings;
use crate::types::Player;
use crate::utils::duration_from_secs_f64;

/// Generate the full player population for one run, sorted by arrival time
pub fn generate_players(settings: &SimulationSettings) -> Vec<Player> {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut events: Vec<(f64, i32, i32)> = (0..settings.players)
        .map(|_| {
            let arrival = rng.gen_range(0.0..settings.duration_seconds);
            let rating = rng.gen_range(settings.rating_min..=settings.rating_max);
            let net_wins = rng.gen_range(settings.net_wins_min..=settings.net_wins_max);
            (arrival, rating, net_wins)
        })
        .collect();

    // total_cmp keeps the order fully defined even for equal arrivals
    events.sort_by(|a, b| a.0.total_cmp(&b.0));

    debug!(
        "Generated {} players over a {:.1}s arrival window (seed: {:?})",
        settings.players, settings.duration_seconds, settings.seed
    );

    events
        .into_iter()
        .enumerate()
        .map(|(i, (arrival, rating, net_wins))| {
            Player::new(
                i as u64 + 1,
                rating,
                net_wins,
                duration_from_secs_f64(arrival),
            )
        })
        .collect()
}
