//! Shared constants for the fencing engine.

pub mod constants;

pub use constants::*;
