//! Error types for the matchmaking engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

use std::time::Duration;

use crate::types::PlayerId;

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific matchmaking scenarios
///
/// Admission errors are rejections of caller input; they never indicate a
/// corrupted queue, and a failed admission leaves the queue untouched.
/// An evaluation pass that finds no match is not an error at all.
#[derive(Debug, thiserror::Error)]
pub enum MatchmakingError {
    #[error("Duplicate player identifier: {id}")]
    DuplicateIdentifier { id: PlayerId },

    #[error("Non-monotonic admission time: {supplied:?} precedes current time {current:?}")]
    NonMonotonicTime {
        supplied: Duration,
        current: Duration,
    },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
