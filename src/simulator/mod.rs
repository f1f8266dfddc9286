//! Balance simulator for Monte Carlo analysis.
//!
//! Checks the engine against its own hit table:
//! - Measured lunge hit rate at each distance vs. the table value
//! - Scripted full matches: length, rounds, sudden death frequency
//!
//! Everything goes through the same resolver and controller the game uses.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{DistanceStats, DuelStats, DuelSummary, SimReport};
pub use runner::{measure_distance, run_duel, run_simulation};
