//! Concurrency tests for hosts that share one matchmaker across threads
//!
//! The engine itself is synchronous and single-threaded; these tests pin
//! down the supported hosting pattern, one mutex around the whole
//! matchmaker so each admission runs as an atomic step.

mod fixtures;

use ready_room::matchmaking::controller::Matchmaker;
use ready_room::types::{Match, Player};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use fixtures::{create_test_matchmaker, create_tight_pool};

/// Shared state for a multi-threaded run: the matchmaker, the arrival
/// sequence cursor, and every match committed so far
struct SharedRun {
    matchmaker: Matchmaker,
    players: Vec<Player>,
    next: usize,
    matches: Vec<Match>,
}

impl SharedRun {
    fn new(players: Vec<Player>) -> Self {
        Self {
            matchmaker: create_test_matchmaker(),
            players,
            next: 0,
            matches: Vec::new(),
        }
    }

    /// Admit the next queued arrival while the lock is held, so the
    /// arrival order stays monotonic no matter which thread runs
    fn admit_next(&mut self) -> bool {
        if self.next >= self.players.len() {
            return false;
        }
        let player = self.players[self.next];
        self.next += 1;
        if let Some(matched) = self.matchmaker.admit(player).unwrap() {
            self.matches.push(matched);
        }
        true
    }
}

fn run_threads(shared: &Arc<Mutex<SharedRun>>, thread_count: usize) {
    let handles: Vec<_> = (0..thread_count)
        .map(|_| {
            let shared = Arc::clone(shared);
            thread::spawn(move || loop {
                let mut run = shared.lock().unwrap();
                if !run.admit_next() {
                    break;
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

fn assert_run_reconciles(run: &SharedRun, total_players: usize) {
    let stats = run.matchmaker.stats();
    assert_eq!(stats.players_admitted, total_players as u64);
    assert_eq!(stats.matches_created, run.matches.len() as u64);
    assert_eq!(
        stats.players_admitted,
        stats.players_matched + stats.players_pending as u64
    );

    // No player may appear in two matches or in a match and the queue
    let mut seen = HashSet::new();
    for matched in &run.matches {
        for player in matched.players() {
            assert!(seen.insert(player.id), "player {} matched twice", player.id);
        }
    }
    for player in run.matchmaker.pending() {
        assert!(
            seen.insert(player.id),
            "player {} matched and still queued",
            player.id
        );
    }
    assert_eq!(seen.len(), total_players);

    // Sequence numbers climb one by one
    for (i, matched) in run.matches.iter().enumerate() {
        assert_eq!(matched.sequence, i as u64 + 1);
    }
}

#[test]
fn test_concurrent_admissions_share_one_queue() {
    let total_players = 100;
    let shared = Arc::new(Mutex::new(SharedRun::new(create_tight_pool(
        total_players,
        1,
        1500,
        0,
    ))));

    let start_time = Instant::now();
    run_threads(&shared, 4);
    let duration = start_time.elapsed();

    let run = shared.lock().unwrap();
    assert_run_reconciles(&run, total_players);

    // A tight pool matches everyone in groups of ten
    assert_eq!(run.matches.len(), 10);
    assert_eq!(run.matchmaker.pending_count(), 0);

    let throughput = total_players as f64 / duration.as_secs_f64();
    println!(
        "✅ 100 concurrent admissions test passed - Throughput: {:.1} admissions/sec",
        throughput
    );
}

#[test]
fn test_heavy_thread_contention() {
    let total_players = 400;
    let shared = Arc::new(Mutex::new(SharedRun::new(create_tight_pool(
        total_players,
        1,
        1500,
        0,
    ))));

    let start_time = Instant::now();
    run_threads(&shared, 8);
    let duration = start_time.elapsed();

    let run = shared.lock().unwrap();
    assert_run_reconciles(&run, total_players);
    assert!(
        duration < Duration::from_secs(10),
        "400 admissions should complete within 10 seconds, took: {:?}",
        duration
    );

    println!(
        "✅ Heavy contention test passed - {} matches in {:?}",
        run.matches.len(),
        duration
    );
}

#[test]
fn test_rapid_sequential_admissions() {
    let total_players = 200;
    let mut run = SharedRun::new(create_tight_pool(total_players, 1, 1500, 0));

    let start_time = Instant::now();
    while run.admit_next() {}
    let duration = start_time.elapsed();

    assert_run_reconciles(&run, total_players);
    assert_eq!(run.matches.len(), 20);

    println!(
        "✅ Rapid sequential admissions test passed - {} admissions in {:?}",
        total_players, duration
    );
}
