//! Simulation report generation.

use crate::duel::probability::within_reach;
use crate::duel::Side;
use serde::Serialize;

/// Empirical lunge results at one distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceStats {
    pub distance: i32,
    pub trials: u32,
    pub hits: u32,
    pub blocked: u32,
    /// Table chance, in percent
    pub expected_percent: f64,
    /// Measured hit rate, in percent
    pub observed_percent: f64,
}

impl DistanceStats {
    pub fn new(distance: i32, trials: u32, hits: u32, blocked: u32, expected_percent: f64) -> Self {
        let observed_percent = if trials > 0 {
            hits as f64 * 100.0 / trials as f64
        } else {
            0.0
        };
        Self {
            distance,
            trials,
            hits,
            blocked,
            expected_percent,
            observed_percent,
        }
    }

    pub fn deviation(&self) -> f64 {
        self.observed_percent - self.expected_percent
    }
}

/// Outcome of one scripted duel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DuelStats {
    pub winner: Option<Side>,
    pub left_score: u32,
    pub right_score: u32,
    pub frames: u64,
    pub rounds_played: u32,
    pub sudden_death_extensions: u32,
    pub strikes: u32,
    pub touches: u32,
    pub timed_out: bool,
}

/// Aggregates over all scripted duels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuelSummary {
    pub num_duels: u32,
    pub left_wins: u32,
    pub right_wins: u32,
    pub timed_out: u32,
    pub went_to_sudden_death: u32,
    pub avg_seconds: f64,
    pub avg_rounds: f64,
    pub avg_touches: f64,
    /// Touches per strike across all duels, in percent
    pub touch_rate_percent: f64,
}

impl DuelSummary {
    pub fn from_duels(duels: &[DuelStats], frames_per_second: u32) -> Self {
        let n = duels.len().max(1) as f64;
        let strikes: u32 = duels.iter().map(|d| d.strikes).sum();
        let touches: u32 = duels.iter().map(|d| d.touches).sum();

        Self {
            num_duels: duels.len() as u32,
            left_wins: count(duels, |d| d.winner == Some(Side::Left)),
            right_wins: count(duels, |d| d.winner == Some(Side::Right)),
            timed_out: count(duels, |d| d.timed_out),
            went_to_sudden_death: count(duels, |d| d.sudden_death_extensions > 0),
            avg_seconds: duels.iter().map(|d| d.frames as f64).sum::<f64>()
                / n
                / frames_per_second as f64,
            avg_rounds: duels.iter().map(|d| d.rounds_played as f64).sum::<f64>() / n,
            avg_touches: touches as f64 / n,
            touch_rate_percent: if strikes > 0 {
                touches as f64 * 100.0 / strikes as f64
            } else {
                0.0
            },
        }
    }
}

fn count(duels: &[DuelStats], predicate: impl Fn(&DuelStats) -> bool) -> u32 {
    duels.iter().filter(|d| predicate(d)).count() as u32
}

/// Aggregated results from a simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub distances: Vec<DistanceStats>,
    pub duels: Option<DuelSummary>,
    #[serde(skip)]
    pub duel_stats: Vec<DuelStats>,
}

impl SimReport {
    pub fn new(distances: Vec<DistanceStats>, duel_stats: Vec<DuelStats>) -> Self {
        let duels = if duel_stats.is_empty() {
            None
        } else {
            Some(DuelSummary::from_duels(
                &duel_stats,
                crate::core::constants::FRAMES_PER_SECOND,
            ))
        };
        Self {
            distances,
            duels,
            duel_stats,
        }
    }

    /// Largest absolute gap between measured and table hit rates.
    pub fn max_deviation(&self) -> f64 {
        self.distances
            .iter()
            .map(|d| d.deviation().abs())
            .fold(0.0, f64::max)
    }

    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str("── LUNGE HIT RATES ──────────────────────────────────────────────\n");
        report.push_str("  Distance   Trials     Table    Observed   Deviation\n");
        for d in &self.distances {
            report.push_str(&format!(
                "  {:>8}   {:>6}   {:>6.1}%   {:>7.2}%   {:>+8.2}{}\n",
                d.distance,
                d.trials,
                d.expected_percent,
                d.observed_percent,
                d.deviation(),
                if within_reach(d.distance) {
                    ""
                } else {
                    "   (out of reach)"
                }
            ));
        }
        report.push_str(&format!(
            "\n  Max deviation:       {:.2} pts\n\n",
            self.max_deviation()
        ));

        if let Some(duels) = &self.duels {
            report.push_str("── SCRIPTED DUELS ───────────────────────────────────────────────\n");
            report.push_str(&format!(
                "  Duels:               {} ({} timed out)\n",
                duels.num_duels, duels.timed_out
            ));
            report.push_str(&format!(
                "  Wins (P1 / P2):      {} / {}\n",
                duels.left_wins, duels.right_wins
            ));
            report.push_str(&format!(
                "  Sudden death:        {}\n",
                duels.went_to_sudden_death
            ));
            report.push_str(&format!("  Avg Length:          {:.1}s\n", duels.avg_seconds));
            report.push_str(&format!("  Avg Rounds:          {:.2}\n", duels.avg_rounds));
            report.push_str(&format!("  Avg Touches:         {:.2}\n", duels.avg_touches));
            report.push_str(&format!(
                "  Touch Rate:          {:.1}% of strikes\n",
                duels.touch_rate_percent
            ));
        }

        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
