//! Wait time aggregation for finished runs

use std::time::Duration;

/// Accumulates how long matched players spent queued
///
/// Samples stream in as matches commit; the summary values are derived on
/// demand, so the aggregate itself is just a handful of running numbers.
#[derive(Debug, Clone)]
pub struct WaitTimeStats {
    samples: u64,
    total_seconds: f64,
    total_squared_seconds: f64,
    shortest: Option<Duration>,
    longest: Duration,
}

impl WaitTimeStats {
    pub fn new() -> Self {
        Self {
            samples: 0,
            total_seconds: 0.0,
            total_squared_seconds: 0.0,
            shortest: None,
            longest: Duration::ZERO,
        }
    }

    /// Fold one player's wait into the aggregate
    pub fn add_sample(&mut self, wait: Duration) {
        let seconds = wait.as_secs_f64();

        self.samples += 1;
        self.total_seconds += seconds;
        self.total_squared_seconds += seconds * seconds;
        self.shortest = Some(match self.shortest {
            Some(current) => current.min(wait),
            None => wait,
        });
        self.longest = self.longest.max(wait);
    }

    pub fn sample_count(&self) -> u64 {
        self.samples
    }

    /// Mean wait across all samples, zero when empty
    pub fn mean(&self) -> Duration {
        if self.samples == 0 {
            return Duration::ZERO;
        }

        Duration::from_secs_f64(self.total_seconds / self.samples as f64)
    }

    /// Population standard deviation, zero below two samples
    pub fn standard_deviation(&self) -> Duration {
        if self.samples <= 1 {
            return Duration::ZERO;
        }

        let mean = self.total_seconds / self.samples as f64;
        let variance = self.total_squared_seconds / self.samples as f64 - mean * mean;
        // Float cancellation can push a tiny variance below zero
        Duration::from_secs_f64(variance.max(0.0).sqrt())
    }

    /// Shortest wait observed, zero when empty
    pub fn min(&self) -> Duration {
        self.shortest.unwrap_or(Duration::ZERO)
    }

    /// Longest wait observed, zero when empty
    pub fn max(&self) -> Duration {
        self.longest
    }
}

impl Default for WaitTimeStats {
    fn default() -> Self {
        Self::new()
    }
}
