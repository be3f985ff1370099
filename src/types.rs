//! Common types used throughout the matchmaking engine

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Unique identifier for players
pub type PlayerId = u64;

/// Number of players pulled out of the queue per match
pub const MATCH_SIZE: usize = 10;

/// Number of players on each side of a match
pub const TEAM_SIZE: usize = 5;

/// Player information for matchmaking
///
/// Records are immutable once admitted; `joined_at` is the logical
/// simulation time supplied by the caller at admission, not wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Skill rating, nominally 1000..=3000
    pub rating: i32,
    /// Wins minus losses over recent games, nominally -10..=10
    pub net_wins: i32,
    pub joined_at: Duration,
}

impl Player {
    pub fn new(id: PlayerId, rating: i32, net_wins: i32, joined_at: Duration) -> Self {
        Self {
            id,
            rating,
            net_wins,
            joined_at,
        }
    }
}

/// One side of a match, exactly [`TEAM_SIZE`] players once committed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub players: Vec<Player>,
}

impl Team {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    /// Sum of net wins across the team, widened so ten extreme players
    /// cannot overflow
    pub fn net_wins_sum(&self) -> i64 {
        self.players.iter().map(|p| p.net_wins as i64).sum()
    }

    pub fn avg_net_wins(&self) -> f64 {
        if self.players.is_empty() {
            return 0.0;
        }
        self.net_wins_sum() as f64 / self.players.len() as f64
    }

    pub fn avg_rating(&self) -> f64 {
        if self.players.is_empty() {
            return 0.0;
        }
        let sum: i64 = self.players.iter().map(|p| p.rating as i64).sum();
        sum as f64 / self.players.len() as f64
    }
}

/// A full group divided into two disjoint teams
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSplit {
    pub team_a: Team,
    pub team_b: Team,
}

impl TeamSplit {
    pub fn new(team_a: Team, team_b: Team) -> Self {
        Self { team_a, team_b }
    }

    /// Absolute difference between the teams' net-win sums
    ///
    /// Integer form of the imbalance, used wherever two splits are compared
    /// so that policy decisions never depend on floating-point rounding.
    pub fn net_wins_gap(&self) -> i64 {
        (self.team_a.net_wins_sum() - self.team_b.net_wins_sum()).abs()
    }

    /// Absolute difference between the teams' average net wins
    pub fn imbalance(&self) -> f64 {
        self.net_wins_gap() as f64 / TEAM_SIZE as f64
    }

    /// Both rosters in team order, Team A first
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.team_a.players.iter().chain(self.team_b.players.iter())
    }
}

/// A committed match removed from the queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Monotonically increasing sequence number, 1 for the first match
    pub sequence: u64,
    /// Logical time at which the match was committed
    pub created_at: Duration,
    pub split: TeamSplit,
}

impl Match {
    /// Highest minus lowest rating across all ten players
    pub fn rating_spread(&self) -> i32 {
        let min = self.split.players().map(|p| p.rating).min();
        let max = self.split.players().map(|p| p.rating).max();
        match (min, max) {
            (Some(min), Some(max)) => max - min,
            _ => 0,
        }
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.split.players()
    }

    /// How long the given player waited in the queue before this match
    pub fn wait_time_of(&self, player: &Player) -> Duration {
        self.created_at.saturating_sub(player.joined_at)
    }
}

/// Statistics about matchmaker operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchmakerStats {
    /// Total number of players admitted to the queue
    pub players_admitted: u64,
    /// Total number of matches committed
    pub matches_created: u64,
    /// Total number of players removed by committed matches
    pub players_matched: u64,
    /// Players currently waiting in the queue
    pub players_pending: usize,
}
