//! Reporting for simulation runs
//!
//! This module turns committed matches and end-of-run counters into the
//! user-facing text report and a machine-readable JSON document.

pub mod render;
pub mod stats;

// Re-export commonly used types
pub use render::{MatchRecord, RunReport, RunSummary, WaitSummary};
pub use stats::WaitTimeStats;
