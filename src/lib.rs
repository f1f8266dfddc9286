//! Fencing - Two-Player Terminal Fencing Duel Library
//!
//! This module exposes the match engine for testing and external use.

pub mod build_info;
pub mod core;
pub mod duel;
pub mod error;
pub mod simulator;

pub use duel::{
    Intent, MatchConfig, MatchController, MatchEvent, MatchPhase, MatchSnapshot, PointsToWin,
    Side,
};
pub use error::{MatchError, MatchResult};
