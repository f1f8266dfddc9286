//! Round timing and the match phase machine.
//!
//! The clock only knows about time and scores. It decides when a round is
//! over and what comes next; the controller applies the consequences to the
//! fencers.

use super::config::MatchConfig;
use super::types::Side;
use crate::core::constants::COUNTDOWN_LABELS;
use serde::{Deserialize, Serialize};

/// Where the match is. The pre-match menu lives in the frontend and has no
/// phase here: a clock only exists once the points have been chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// "Ready / Set / GO" before a regulation round.
    Countdown,
    /// "Ready / Set / GO" before a sudden-death extension.
    SuddenDeathCountdown,
    Active,
    MatchEnd,
}

impl MatchPhase {
    pub fn is_countdown(self) -> bool {
        matches!(
            self,
            MatchPhase::Countdown | MatchPhase::SuddenDeathCountdown
        )
    }
}

/// What happens when the time runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundVerdict {
    /// Another regulation round follows.
    NextRound { round: u32 },
    /// Scores are level after the last round: play an extension.
    SuddenDeath { extension: u32 },
    /// Higher score at the final whistle.
    Decided { winner: Side },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundClock {
    phase: MatchPhase,
    current_round: u32,
    total_rounds: u32,
    time_remaining: f64,
    countdown_remaining: f64,
    /// Number of sudden-death extensions started so far.
    extensions: u32,
    round_seconds: f64,
    sudden_death_seconds: f64,
    countdown_seconds: f64,
}

impl RoundClock {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            phase: MatchPhase::Countdown,
            current_round: 1,
            total_rounds: config.total_rounds(),
            time_remaining: config.round_seconds,
            countdown_remaining: config.countdown_seconds,
            extensions: 0,
            round_seconds: config.round_seconds,
            sudden_death_seconds: config.sudden_death_seconds,
            countdown_seconds: config.countdown_seconds,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn time_remaining(&self) -> f64 {
        self.time_remaining
    }

    pub fn is_sudden_death(&self) -> bool {
        self.extensions > 0
    }

    pub fn extensions(&self) -> u32 {
        self.extensions
    }

    /// Label to show during a countdown, one per equal slice of its length.
    pub fn countdown_label(&self) -> Option<&'static str> {
        if !self.phase.is_countdown() {
            return None;
        }
        let steps = COUNTDOWN_LABELS.len();
        let elapsed = (self.countdown_seconds - self.countdown_remaining).max(0.0);
        let slice = self.countdown_seconds / steps as f64;
        let index = if slice > 0.0 {
            ((elapsed / slice) as usize).min(steps - 1)
        } else {
            steps - 1
        };
        Some(COUNTDOWN_LABELS[index])
    }

    /// Run the countdown. Returns true on the tick play begins; time left
    /// over from that tick is dropped.
    pub fn advance_countdown(&mut self, dt: f64) -> bool {
        if !self.phase.is_countdown() {
            return false;
        }
        self.countdown_remaining -= dt;
        if self.countdown_remaining > 0.0 {
            return false;
        }
        self.countdown_remaining = 0.0;
        self.phase = MatchPhase::Active;
        true
    }

    /// Burn `dt` seconds of match time. Returns true once the period has
    /// expired; the remaining time is clamped at zero.
    pub fn run(&mut self, dt: f64) -> bool {
        if self.phase != MatchPhase::Active {
            return false;
        }
        self.time_remaining -= dt;
        if self.time_remaining > 0.0 {
            return false;
        }
        self.time_remaining = 0.0;
        true
    }

    /// Decide what follows an expired period and move into it.
    pub fn conclude(&mut self, left_score: u32, right_score: u32) -> RoundVerdict {
        if !self.is_sudden_death() && self.current_round < self.total_rounds {
            self.current_round += 1;
            self.time_remaining = self.round_seconds;
            self.begin_countdown(MatchPhase::Countdown);
            return RoundVerdict::NextRound {
                round: self.current_round,
            };
        }

        if left_score != right_score {
            let winner = if left_score > right_score {
                Side::Left
            } else {
                Side::Right
            };
            self.phase = MatchPhase::MatchEnd;
            return RoundVerdict::Decided { winner };
        }

        self.extensions += 1;
        self.time_remaining = self.sudden_death_seconds;
        self.begin_countdown(MatchPhase::SuddenDeathCountdown);
        RoundVerdict::SuddenDeath {
            extension: self.extensions,
        }
    }

    /// End the match now (threshold reached or abandoned).
    pub fn finish(&mut self) {
        self.phase = MatchPhase::MatchEnd;
    }

    fn begin_countdown(&mut self, phase: MatchPhase) {
        self.countdown_remaining = self.countdown_seconds;
        self.phase = phase;
    }
}
