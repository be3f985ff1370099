//! Team balancing policies for splitting a matched group into two sides
//!
//! Balancing works on net wins, not raw rating: the selector already
//! guarantees the group is close in skill, so the split only has to even out
//! recent form between the two teams.

use crate::types::{Player, Team, TeamSplit, MATCH_SIZE, TEAM_SIZE};

/// Trait for team balancing policies
///
/// Implementations must be deterministic: the same set of players always
/// yields the identical split, regardless of input order. `group` holds
/// exactly [`MATCH_SIZE`] players; callers uphold that precondition.
pub trait TeamBalancer: Send + Sync {
    /// Divide the group into two teams of [`TEAM_SIZE`] players each
    fn split(&self, group: &[Player]) -> TeamSplit;

    /// Short policy name for logs and reports
    fn name(&self) -> &'static str;
}

/// Sort the group by descending net wins, ties broken by ascending id
///
/// Both policies start from this order so their output never depends on how
/// the caller happened to arrange the slice.
fn canonical_order(group: &[Player]) -> Vec<Player> {
    let mut ordered = group.to_vec();
    ordered.sort_by(|a, b| b.net_wins.cmp(&a.net_wins).then(a.id.cmp(&b.id)));
    ordered
}

/// Greedy two-bucket balancer
///
/// Walks the group strongest-form first and drops each player onto the side
/// with the lower running net-win sum. A full side forces the other; equal
/// sums go to the smaller team, and Team A when sizes also tie.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyBalancer;

impl GreedyBalancer {
    pub fn new() -> Self {
        Self
    }
}

impl TeamBalancer for GreedyBalancer {
    fn split(&self, group: &[Player]) -> TeamSplit {
        debug_assert_eq!(group.len(), MATCH_SIZE);

        let mut team_a: Vec<Player> = Vec::with_capacity(TEAM_SIZE);
        let mut team_b: Vec<Player> = Vec::with_capacity(TEAM_SIZE);
        let mut sum_a: i64 = 0;
        let mut sum_b: i64 = 0;

        for player in canonical_order(group) {
            let take_a = if team_a.len() == TEAM_SIZE {
                false
            } else if team_b.len() == TEAM_SIZE {
                true
            } else if sum_a != sum_b {
                sum_a < sum_b
            } else {
                team_a.len() <= team_b.len()
            };

            if take_a {
                sum_a += player.net_wins as i64;
                team_a.push(player);
            } else {
                sum_b += player.net_wins as i64;
                team_b.push(player);
            }
        }

        TeamSplit::new(Team::new(team_a), Team::new(team_b))
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

/// Exhaustive optimal balancer
///
/// Enumerates every 5-and-5 partition of the group and keeps the one with
/// the smallest net-win gap. The first player in canonical order is pinned
/// to Team A, which halves the search without losing any distinct partition
/// since mirrored splits have the same gap. That leaves 126 subsets for a
/// ten-player group, cheap enough to run on every candidate window.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExhaustiveBalancer;

impl ExhaustiveBalancer {
    pub fn new() -> Self {
        Self
    }
}

impl TeamBalancer for ExhaustiveBalancer {
    fn split(&self, group: &[Player]) -> TeamSplit {
        debug_assert_eq!(group.len(), MATCH_SIZE);

        let ordered = canonical_order(group);
        let Some(first) = ordered.first() else {
            return TeamSplit::new(Team::new(Vec::new()), Team::new(Vec::new()));
        };
        let rest = &ordered[1..];

        // Bit i of a mask assigns rest[i] to Team A alongside the pinned
        // first player. Ascending mask order plus strict improvement keeps
        // the search deterministic when several partitions tie.
        let mut best_gap = i64::MAX;
        let mut best_mask: u32 = 0;
        for mask in 0u32..(1 << rest.len()) {
            if mask.count_ones() as usize != TEAM_SIZE - 1 {
                continue;
            }

            let mut sum_a = first.net_wins as i64;
            let mut sum_b = 0i64;
            for (i, player) in rest.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    sum_a += player.net_wins as i64;
                } else {
                    sum_b += player.net_wins as i64;
                }
            }

            let gap = (sum_a - sum_b).abs();
            if gap < best_gap {
                best_gap = gap;
                best_mask = mask;
            }
        }

        let mut team_a = Vec::with_capacity(TEAM_SIZE);
        let mut team_b = Vec::with_capacity(TEAM_SIZE);
        team_a.push(*first);
        for (i, player) in rest.iter().enumerate() {
            if best_mask & (1 << i) != 0 {
                team_a.push(*player);
            } else {
                team_b.push(*player);
            }
        }

        TeamSplit::new(Team::new(team_a), Team::new(team_b))
    }

    fn name(&self) -> &'static str {
        "exhaustive"
    }
}
