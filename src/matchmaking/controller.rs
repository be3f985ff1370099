//! Queue controller driving admission and match evaluation
//!
//! This module owns the waiting queue, the logical clock, and the match
//! counter. Every successful admission runs a full evaluation pass, so a
//! match commits at the earliest moment one exists.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{MatchmakingError, Result};
use crate::matchmaking::balancer::{GreedyBalancer, TeamBalancer};
use crate::matchmaking::selector::WindowSelector;
use crate::types::{Match, MatchmakerStats, Player, PlayerId, TeamSplit, MATCH_SIZE};

/// Configuration for matchmaker behavior
#[derive(Debug, Clone)]
pub struct MatchmakerConfig {
    /// Maximum rating spread allowed inside a committed match
    pub max_spread: i32,
}

impl Default for MatchmakerConfig {
    fn default() -> Self {
        Self {
            max_spread: 200, // rating points
        }
    }
}

impl MatchmakerConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.max_spread < 0 {
            return Err(MatchmakingError::ConfigurationError {
                message: "max_spread must be non-negative".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// The queue controller
///
/// Single-threaded and synchronous: `admit` and `evaluate_pass` run to
/// completion before returning, and no state changes between calls. Hosts
/// that share a matchmaker across threads wrap it in their own mutual
/// exclusion, one lock per queue.
pub struct Matchmaker {
    config: MatchmakerConfig,
    selector: WindowSelector,
    balancer: Arc<dyn TeamBalancer>,
    queue: VecDeque<Player>,
    current_time: Duration,
    players_admitted: u64,
    matches_created: u64,
    players_matched: u64,
}

impl Matchmaker {
    /// Create a matchmaker with the default greedy balancing policy
    pub fn new(config: MatchmakerConfig) -> Self {
        Self::with_balancer(config, Arc::new(GreedyBalancer::new()))
    }

    /// Create a matchmaker with a specific balancing policy
    pub fn with_balancer(config: MatchmakerConfig, balancer: Arc<dyn TeamBalancer>) -> Self {
        Self {
            config,
            selector: WindowSelector::new(),
            balancer,
            queue: VecDeque::new(),
            current_time: Duration::ZERO,
            players_admitted: 0,
            matches_created: 0,
            players_matched: 0,
        }
    }

    /// Admit a player into the queue and immediately look for a match
    ///
    /// The player's `joined_at` is the caller's current time and advances
    /// the controller clock. Rejections leave the queue, the clock, and all
    /// counters untouched; `Ok(None)` means the player is waiting, which is
    /// the normal outcome, not a failure.
    pub fn admit(&mut self, player: Player) -> Result<Option<Match>> {
        // Check identity before time so a duplicate is reported as such
        // even when its timestamp is also stale
        if self.queue.iter().any(|queued| queued.id == player.id) {
            return Err(MatchmakingError::DuplicateIdentifier { id: player.id }.into());
        }

        // The clock never moves backwards; equal timestamps are allowed
        if player.joined_at < self.current_time {
            return Err(MatchmakingError::NonMonotonicTime {
                supplied: player.joined_at,
                current: self.current_time,
            }
            .into());
        }

        self.current_time = player.joined_at;
        self.queue.push_back(player);
        self.players_admitted += 1;

        debug!(
            "Admitted player {} (rating {}, net wins {}) at {:?}; queue depth {}",
            player.id,
            player.rating,
            player.net_wins,
            player.joined_at,
            self.queue.len()
        );

        Ok(self.evaluate_pass())
    }

    /// Run one evaluation pass over the current queue
    ///
    /// Balances every candidate window and commits the one with the lowest
    /// imbalance, removing its players from the queue. Ties go to the
    /// window that starts earliest in rating-sorted order. Returns `None`
    /// without touching anything when no match can form.
    pub fn evaluate_pass(&mut self) -> Option<Match> {
        if self.queue.len() < MATCH_SIZE {
            return None;
        }

        let pool: Vec<Player> = self.queue.iter().copied().collect();
        let windows = self.selector.select(&pool, self.config.max_spread);

        // Windows arrive in ascending start order, so strict improvement
        // keeps the earliest window among equal gaps
        let mut best: Option<(i64, TeamSplit)> = None;
        for window in windows {
            let split = self.balancer.split(&window.players);
            let gap = split.net_wins_gap();
            let better = match &best {
                Some((best_gap, _)) => gap < *best_gap,
                None => true,
            };
            if better {
                best = Some((gap, split));
            }
        }

        let Some((_, split)) = best else {
            debug!(
                "No committable match among {} queued players (max spread {})",
                self.queue.len(),
                self.config.max_spread
            );
            return None;
        };

        // Pull the winners out, preserving everyone else's arrival order
        let committed_ids: HashSet<PlayerId> = split.players().map(|p| p.id).collect();
        self.queue.retain(|p| !committed_ids.contains(&p.id));

        self.matches_created += 1;
        self.players_matched += committed_ids.len() as u64;

        let matched = Match {
            sequence: self.matches_created,
            created_at: self.current_time,
            split,
        };

        info!(
            "Match {} committed at {:?}: spread {}, imbalance {:.2}, policy {}, queue depth now {}",
            matched.sequence,
            matched.created_at,
            matched.rating_spread(),
            matched.split.imbalance(),
            self.balancer.name(),
            self.queue.len()
        );

        Some(matched)
    }

    /// Number of players currently waiting
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Waiting players in arrival order
    pub fn pending(&self) -> impl Iterator<Item = &Player> {
        self.queue.iter()
    }

    /// The controller's logical clock
    pub fn current_time(&self) -> Duration {
        self.current_time
    }

    /// Total matches committed so far
    pub fn matches_created(&self) -> u64 {
        self.matches_created
    }

    /// Name of the active balancing policy
    pub fn balance_policy(&self) -> &'static str {
        self.balancer.name()
    }

    pub fn config(&self) -> &MatchmakerConfig {
        &self.config
    }

    /// Snapshot of the lifetime counters
    pub fn stats(&self) -> MatchmakerStats {
        MatchmakerStats {
            players_admitted: self.players_admitted,
            matches_created: self.matches_created,
            players_matched: self.players_matched,
            players_pending: self.queue.len(),
        }
    }
}
