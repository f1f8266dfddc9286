//! Injectable random source for hit rolls.
//!
//! Resolution only needs one uniform draw in `[0, 100)` per strike. Keeping it
//! behind a trait lets tests pin rolls and lets the simulator reproduce runs.

use crate::error::{MatchError, MatchResult};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Source of hit rolls.
pub trait HitRoll {
    /// Draw a uniform value in `[0, 100)`.
    fn roll(&mut self) -> MatchResult<f64>;
}

/// Hit rolls backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngRoll<R> {
    rng: R,
}

impl<R: RngCore> RngRoll<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngRoll<ChaCha8Rng> {
    /// Reproducible rolls for replays and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: RngCore> HitRoll for RngRoll<R> {
    fn roll(&mut self) -> MatchResult<f64> {
        let mut bytes = [0u8; 8];
        self.rng
            .try_fill_bytes(&mut bytes)
            .map_err(MatchError::RollSource)?;
        // 53 random mantissa bits -> [0, 1)
        let unit = (u64::from_le_bytes(bytes) >> 11) as f64 / (1u64 << 53) as f64;
        Ok(unit * 100.0)
    }
}

/// Always returns the same roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRoll(pub f64);

impl HitRoll for FixedRoll {
    fn roll(&mut self) -> MatchResult<f64> {
        Ok(self.0)
    }
}

/// Plays back a fixed sequence of rolls, then repeats `fallback`.
#[derive(Debug, Clone)]
pub struct ScriptedRoll {
    rolls: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedRoll {
    pub fn new(rolls: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback,
        }
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl HitRoll for ScriptedRoll {
    fn roll(&mut self) -> MatchResult<f64> {
        Ok(self.rolls.pop_front().unwrap_or(self.fallback))
    }
}
