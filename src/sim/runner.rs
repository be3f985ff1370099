//! Driving the matchmaker from a generated arrival sequence

use std::time::Duration;

use tracing::info;

use crate::config::AppConfig;
use crate::error::Result;
use crate::matchmaking::controller::Matchmaker;
use crate::report::stats::WaitTimeStats;
use crate::sim::generator::generate_players;
use crate::types::{Match, MatchmakerStats, Player};

/// Everything a finished run leaves behind
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    /// Committed matches in commit order
    pub matches: Vec<Match>,
    /// Players still waiting when arrivals ran out, in arrival order
    pub pending: Vec<Player>,
    /// The controller clock after the last admission
    pub final_time: Duration,
    /// Lifetime counters from the matchmaker
    pub stats: MatchmakerStats,
    /// Wait time aggregate over all matched players
    pub wait_times: WaitTimeStats,
}

/// Run a full simulation: generate the population, admit every player in
/// arrival order, and collect the matches that commit along the way
///
/// `on_match` fires for each committed match before the next admission, so
/// a caller can report progress as the run unfolds.
pub fn run_simulation(
    config: &AppConfig,
    mut on_match: impl FnMut(&Match),
) -> Result<SimulationOutcome> {
    let players = generate_players(&config.simulation);
    let mut matchmaker = Matchmaker::with_balancer(
        config.engine.matchmaker_config(),
        config.engine.balance_policy.create_balancer(),
    );

    info!(
        "Starting simulation: {} players over {:.1}s, max spread {}, policy {}",
        players.len(),
        config.simulation.duration_seconds,
        config.engine.max_spread,
        matchmaker.balance_policy()
    );

    let mut matches = Vec::new();
    let mut wait_times = WaitTimeStats::new();

    for player in players {
        if let Some(matched) = matchmaker.admit(player)? {
            for member in matched.players() {
                wait_times.add_sample(matched.wait_time_of(member));
            }
            on_match(&matched);
            matches.push(matched);
        }
    }

    let outcome = SimulationOutcome {
        matches,
        pending: matchmaker.pending().copied().collect(),
        final_time: matchmaker.current_time(),
        stats: matchmaker.stats(),
        wait_times,
    };

    info!(
        "Simulation finished: {} matches committed, {} players still queued",
        outcome.stats.matches_created,
        outcome.pending.len()
    );

    Ok(outcome)
}
