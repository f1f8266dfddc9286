//! Match configuration: points to win, round count and timings.

use crate::core::constants::{COUNTDOWN_SECONDS, ROUND_DURATION_SECONDS, SUDDEN_DEATH_SECONDS};
use crate::error::{MatchError, MatchResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The supported match lengths, picked from the pre-match menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PointsToWin {
    Five,
    Ten,
    Fifteen,
}

impl PointsToWin {
    pub const ALL: [PointsToWin; 3] = [PointsToWin::Five, PointsToWin::Ten, PointsToWin::Fifteen];

    pub fn points(self) -> u32 {
        match self {
            PointsToWin::Five => 5,
            PointsToWin::Ten => 10,
            PointsToWin::Fifteen => 15,
        }
    }

    /// Rounds scheduled before sudden death.
    pub fn total_rounds(self) -> u32 {
        match self {
            PointsToWin::Five => 1,
            PointsToWin::Ten => 2,
            PointsToWin::Fifteen => 3,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(PointsToWin::Five)
    }

    pub fn label(self) -> &'static str {
        match self {
            PointsToWin::Five => "5 Points",
            PointsToWin::Ten => "10 Points",
            PointsToWin::Fifteen => "15 Points",
        }
    }
}

impl TryFrom<u32> for PointsToWin {
    type Error = MatchError;

    fn try_from(points: u32) -> MatchResult<Self> {
        match points {
            5 => Ok(PointsToWin::Five),
            10 => Ok(PointsToWin::Ten),
            15 => Ok(PointsToWin::Fifteen),
            other => Err(MatchError::InvalidPointsToWin(other)),
        }
    }
}

impl From<PointsToWin> for u32 {
    fn from(points: PointsToWin) -> Self {
        points.points()
    }
}

/// Everything a match needs before the first tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub points_to_win: PointsToWin,
    /// Regulation round length, in seconds.
    pub round_seconds: f64,
    /// Length of each sudden-death extension, in seconds.
    pub sudden_death_seconds: f64,
    /// "Ready / Set / GO" pause before play resumes, in seconds.
    pub countdown_seconds: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            points_to_win: PointsToWin::Ten,
            round_seconds: ROUND_DURATION_SECONDS,
            sudden_death_seconds: SUDDEN_DEATH_SECONDS,
            countdown_seconds: COUNTDOWN_SECONDS,
        }
    }
}

impl MatchConfig {
    /// Standard timings for the given menu choice. Fails for anything other
    /// than 5, 10 or 15.
    pub fn for_points(points: u32) -> MatchResult<Self> {
        Ok(Self {
            points_to_win: PointsToWin::try_from(points)?,
            ..Default::default()
        })
    }

    pub fn with_points(self, points_to_win: PointsToWin) -> Self {
        Self {
            points_to_win,
            ..self
        }
    }

    pub fn total_rounds(&self) -> u32 {
        self.points_to_win.total_rounds()
    }

    pub fn validate(&self) -> MatchResult<()> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(MatchError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )))
            }
        };
        positive("round_seconds", self.round_seconds)?;
        positive("sudden_death_seconds", self.sudden_death_seconds)?;
        if !self.countdown_seconds.is_finite() || self.countdown_seconds < 0.0 {
            return Err(MatchError::InvalidConfig(format!(
                "countdown_seconds must not be negative, got {}",
                self.countdown_seconds
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> MatchResult<Self> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> MatchResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
