//! Rendering committed matches and run summaries
//!
//! Text output keeps the simulator's banner-and-summary layout; the same
//! data is available as a serde document for machine consumption.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::report::stats::WaitTimeStats;
use crate::sim::SimulationOutcome;
use crate::types::{Match, Team};

/// Width of the banner and summary rules
const RULE_WIDTH: usize = 70;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn minor_rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// Render the startup banner describing the run about to happen
pub fn render_banner(config: &AppConfig) -> String {
    let sim = &config.simulation;
    let mut lines = vec![
        rule(),
        "MATCHMAKING SIMULATION".to_string(),
        rule(),
        format!("Players to simulate: {}", sim.players),
        format!("Max rating spread: {}", config.engine.max_spread),
        format!("Balance policy: {}", config.engine.balance_policy),
        format!("Max simulation time: {}s", sim.duration_seconds),
    ];
    if let Some(seed) = sim.seed {
        lines.push(format!("Seed: {}", seed));
    }
    lines.push(rule());
    lines.join("\n")
}

fn render_team(label: &str, team: &Team, matched: &Match, lines: &mut Vec<String>) {
    lines.push(format!(
        "{} (avg rating {:.1}, avg net wins {:+.2})",
        label,
        team.avg_rating(),
        team.avg_net_wins()
    ));
    for player in &team.players {
        lines.push(format!(
            "    player {:>4}  rating {:>4}  net {:>+3}  waited {:>6.1}s",
            player.id,
            player.rating,
            player.net_wins,
            matched.wait_time_of(player).as_secs_f64()
        ));
    }
}

/// Render one committed match as a text block
pub fn render_match(matched: &Match) -> String {
    let mut lines = vec![
        minor_rule(),
        format!(
            "Match #{} at {:.2}s | spread {} | imbalance {:.2}",
            matched.sequence,
            matched.created_at.as_secs_f64(),
            matched.rating_spread(),
            matched.split.imbalance()
        ),
    ];
    render_team("Team A", &matched.split.team_a, matched, &mut lines);
    render_team("Team B", &matched.split.team_b, matched, &mut lines);
    lines.join("\n")
}

/// Render the end-of-run summary block
pub fn render_summary(outcome: &SimulationOutcome) -> String {
    let stats = &outcome.stats;
    let mut lines = vec![
        String::new(),
        rule(),
        "SIMULATION SUMMARY".to_string(),
        rule(),
        format!("Total players: {}", stats.players_admitted),
        format!("Matches created: {}", stats.matches_created),
        format!("Players matched: {}", stats.players_matched),
        format!("Players still in queue: {}", outcome.pending.len()),
        format!(
            "Final simulation time: {:.2}s",
            outcome.final_time.as_secs_f64()
        ),
    ];
    if outcome.wait_times.sample_count() > 0 {
        lines.push(format!(
            "Average wait: {:.1}s (min {:.1}s, max {:.1}s, std dev {:.1}s)",
            outcome.wait_times.mean().as_secs_f64(),
            outcome.wait_times.min().as_secs_f64(),
            outcome.wait_times.max().as_secs_f64(),
            outcome.wait_times.standard_deviation().as_secs_f64()
        ));
    }
    lines.push(rule());
    lines.join("\n")
}

/// Complete machine-readable report of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub service: String,
    pub balance_policy: String,
    pub max_spread: i32,
    pub matches: Vec<MatchRecord>,
    pub summary: RunSummary,
}

/// One committed match in the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub sequence: u64,
    pub created_at_seconds: f64,
    pub rating_spread: i32,
    pub imbalance: f64,
    pub team_a: TeamRecord,
    pub team_b: TeamRecord,
}

/// One team inside a match record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub avg_rating: f64,
    pub avg_net_wins: f64,
    pub players: Vec<PlayerRecord>,
}

/// One player inside a team record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: u64,
    pub rating: i32,
    pub net_wins: i32,
    pub joined_at_seconds: f64,
    pub wait_seconds: f64,
}

/// End-of-run counters mirroring the text summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total_players: u64,
    pub matches_created: u64,
    pub players_matched: u64,
    pub players_still_queued: usize,
    pub final_time_seconds: f64,
    pub wait_times: WaitSummary,
}

/// Wait time aggregates in plain seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitSummary {
    pub samples: u64,
    pub mean_seconds: f64,
    pub std_dev_seconds: f64,
    pub min_seconds: f64,
    pub max_seconds: f64,
}

impl WaitSummary {
    fn from_stats(stats: &WaitTimeStats) -> Self {
        Self {
            samples: stats.sample_count(),
            mean_seconds: stats.mean().as_secs_f64(),
            std_dev_seconds: stats.standard_deviation().as_secs_f64(),
            min_seconds: stats.min().as_secs_f64(),
            max_seconds: stats.max().as_secs_f64(),
        }
    }
}

impl MatchRecord {
    fn from_match(matched: &Match) -> Self {
        Self {
            sequence: matched.sequence,
            created_at_seconds: matched.created_at.as_secs_f64(),
            rating_spread: matched.rating_spread(),
            imbalance: matched.split.imbalance(),
            team_a: TeamRecord::from_team(&matched.split.team_a, matched),
            team_b: TeamRecord::from_team(&matched.split.team_b, matched),
        }
    }
}

impl TeamRecord {
    fn from_team(team: &Team, matched: &Match) -> Self {
        Self {
            avg_rating: team.avg_rating(),
            avg_net_wins: team.avg_net_wins(),
            players: team
                .players
                .iter()
                .map(|p| PlayerRecord {
                    id: p.id,
                    rating: p.rating,
                    net_wins: p.net_wins,
                    joined_at_seconds: p.joined_at.as_secs_f64(),
                    wait_seconds: matched.wait_time_of(p).as_secs_f64(),
                })
                .collect(),
        }
    }
}

impl RunReport {
    /// Assemble the full report for a finished run
    pub fn from_outcome(config: &AppConfig, outcome: &SimulationOutcome) -> Self {
        Self {
            generated_at: Utc::now(),
            service: config.service.name.clone(),
            balance_policy: config.engine.balance_policy.to_string(),
            max_spread: config.engine.max_spread,
            matches: outcome.matches.iter().map(MatchRecord::from_match).collect(),
            summary: RunSummary {
                total_players: outcome.stats.players_admitted,
                matches_created: outcome.stats.matches_created,
                players_matched: outcome.stats.players_matched,
                players_still_queued: outcome.pending.len(),
                final_time_seconds: outcome.final_time.as_secs_f64(),
                wait_times: WaitSummary::from_stats(&outcome.wait_times),
            },
        }
    }
}
