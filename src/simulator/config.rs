//! Simulation configuration.

use crate::duel::PointsToWin;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Lunges rolled at each distance when measuring hit rates
    pub trials_per_distance: u32,

    /// Largest distance to measure (anything past 7 should never land)
    pub max_distance: i32,

    /// Number of scripted duels to play (0 = skip)
    pub num_duels: u32,

    /// Match length for scripted duels
    pub points_to_win: PointsToWin,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Frame cap per duel before it is counted as timed out
    pub max_frames_per_duel: u64,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            trials_per_distance: 10_000,
            max_distance: 9,
            num_duels: 0,
            points_to_win: PointsToWin::Five,
            seed: None,
            max_frames_per_duel: 200_000,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick hit-table check
    pub fn quick() -> Self {
        Self {
            trials_per_distance: 1_000,
            ..Default::default()
        }
    }

    /// Hit table plus a batch of scripted duels
    pub fn with_duels(num_duels: u32, points_to_win: PointsToWin) -> Self {
        Self {
            num_duels,
            points_to_win,
            ..Default::default()
        }
    }
}
