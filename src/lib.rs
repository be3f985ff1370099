//! Ready Room - deterministic 5v5 skill-window matchmaking
//!
//! This crate matches queued players into balanced ten-player contests based
//! on skill rating and recent form, and ships a seeded simulator that replays
//! synthetic arrival sequences through the engine.

pub mod config;
pub mod error;
pub mod matchmaking;
pub mod report;
pub mod sim;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{MatchmakingError, Result};
pub use types::*;

// Re-export key components
pub use matchmaking::{
    ExhaustiveBalancer, GreedyBalancer, Matchmaker, MatchmakerConfig, TeamBalancer, WindowSelector,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
