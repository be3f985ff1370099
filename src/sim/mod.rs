//! Seeded simulation of players arriving at the queue
//!
//! This module generates a synthetic player population and replays it
//! through the matchmaker in arrival order, collecting every committed
//! match for reporting.

pub mod generator;
pub mod runner;

// Re-export commonly used types
pub use generator::generate_players;
pub use runner::{run_simulation, SimulationOutcome};
