//! Core matchmaking engine
//!
//! This module contains the three stages of match formation: candidate
//! selection over the rating-sorted queue, team balancing within a selected
//! group, and the queue controller that ties them together.

pub mod balancer;
pub mod controller;
pub mod selector;

// Re-export commonly used types
pub use balancer::{ExhaustiveBalancer, GreedyBalancer, TeamBalancer};
pub use controller::{Matchmaker, MatchmakerConfig};
pub use selector::{CandidateWindow, WindowSelector};
