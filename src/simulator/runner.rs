//! Simulation runner driving the real engine.
//!
//! Hit-rate trials call the combat resolver directly so each lunge is an
//! independent sample. Duels run a full `MatchController` with fixed press
//! patterns: the patterns never look at the bout, so they exercise the rules
//! without making decisions.

use super::config::SimConfig;
use super::report::{DistanceStats, DuelStats, SimReport};
use crate::core::constants::{FRAMES_PER_SECOND, MAX_POSITION};
use crate::duel::combat::{self, StrikeOutcome};
use crate::duel::{
    hit_chance, ActorState, HitRoll, Intent, MatchConfig, MatchController, MatchEvent, RngRoll,
    Side,
};
use crate::error::MatchResult;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> MatchResult<SimReport> {
    let mut roll = match config.seed {
        Some(seed) => RngRoll::seeded(seed),
        None => RngRoll::from_entropy(),
    };

    let mut distances = Vec::new();
    for distance in 1..=config.max_distance.min(MAX_POSITION) {
        let stats = measure_distance(distance, config.trials_per_distance, &mut roll)?;
        if config.verbosity >= 2 {
            println!(
                "distance {:>2}: {}/{} hits",
                distance, stats.hits, stats.trials
            );
        }
        distances.push(stats);
    }

    let mut duels = Vec::with_capacity(config.num_duels as usize);
    for duel_idx in 0..config.num_duels {
        let seed = match config.seed {
            Some(seed) => seed.wrapping_add(duel_idx as u64 + 1),
            None => rand::random(),
        };
        let stats = run_duel(config, seed)?;
        if config.verbosity >= 2 {
            println!(
                "Duel {}/{} - {}-{} in {} frames, round {}, extensions {}",
                duel_idx + 1,
                config.num_duels,
                stats.left_score,
                stats.right_score,
                stats.frames,
                stats.rounds_played,
                stats.sudden_death_extensions
            );
        }
        duels.push(stats);
    }

    Ok(SimReport::new(distances, duels))
}

/// Roll `trials` undefended lunges from exactly `distance` cells.
pub fn measure_distance<R: HitRoll + ?Sized>(
    distance: i32,
    trials: u32,
    roll: &mut R,
) -> MatchResult<DistanceStats> {
    let mut hits = 0;
    let mut blocked = 0;

    let defender = ActorState {
        position: distance,
        ..ActorState::new(Side::Right)
    };

    for _ in 0..trials {
        let mut attacker = ActorState {
            position: 0,
            ..ActorState::new(Side::Left)
        };
        combat::lunge(&mut attacker);
        while !attacker.action.is_idle() {
            if let Some(strike) = combat::advance_actor(&mut attacker, &defender, roll)? {
                match strike.outcome {
                    StrikeOutcome::Hit => hits += 1,
                    StrikeOutcome::Blocked => blocked += 1,
                    StrikeOutcome::Miss => {}
                }
            }
        }
    }

    Ok(DistanceStats::new(distance, trials, hits, blocked, hit_chance(distance)))
}

/// One press in a duel pattern.
#[derive(Debug, Clone, Copy)]
enum Press {
    Forward,
    Back,
    Lunge,
    Fleche,
    Defend,
}

impl Press {
    fn intent(self, side: Side) -> Intent {
        match self {
            Press::Forward => Intent::Move {
                side,
                forward: true,
            },
            Press::Back => Intent::Move {
                side,
                forward: false,
            },
            Press::Lunge => Intent::Lunge(side),
            Press::Fleche => Intent::Fleche(side),
            Press::Defend => Intent::Defend(side),
        }
    }
}

/// A fencer's fixed press pattern: one press every `interval` frames.
struct DuelScript {
    side: Side,
    pattern: &'static [Press],
    interval: u64,
    offset: u64,
}

impl DuelScript {
    fn press_at(&self, frame: u64) -> Option<Intent> {
        if frame < self.offset || (frame - self.offset) % self.interval != 0 {
            return None;
        }
        let step = ((frame - self.offset) / self.interval) as usize % self.pattern.len();
        Some(self.pattern[step].intent(self.side))
    }
}

const LEFT_PATTERN: &[Press] = &[
    Press::Forward,
    Press::Forward,
    Press::Forward,
    Press::Lunge,
    Press::Back,
    Press::Defend,
    Press::Forward,
    Press::Fleche,
    Press::Back,
    Press::Back,
];

const RIGHT_PATTERN: &[Press] = &[
    Press::Forward,
    Press::Forward,
    Press::Defend,
    Press::Lunge,
    Press::Back,
    Press::Forward,
    Press::Lunge,
    Press::Back,
];

/// Play one scripted duel to completion (or the frame cap).
pub fn run_duel(config: &SimConfig, seed: u64) -> MatchResult<DuelStats> {
    let match_config = MatchConfig::default().with_points(config.points_to_win);
    let mut game = MatchController::seeded(match_config, seed)?;

    let scripts = [
        DuelScript {
            side: Side::Left,
            pattern: LEFT_PATTERN,
            interval: 7,
            offset: 0,
        },
        DuelScript {
            side: Side::Right,
            pattern: RIGHT_PATTERN,
            interval: 9,
            offset: 3,
        },
    ];

    let dt = 1.0 / FRAMES_PER_SECOND as f64;
    let mut stats = DuelStats::default();

    for frame in 0..config.max_frames_per_duel {
        let intents: Vec<Intent> = scripts.iter().filter_map(|s| s.press_at(frame)).collect();

        for event in game.tick(&intents, dt)? {
            match event {
                MatchEvent::Strike(strike) => {
                    stats.strikes += 1;
                    if strike.is_hit() {
                        stats.touches += 1;
                    }
                }
                MatchEvent::SuddenDeath { .. } => stats.sudden_death_extensions += 1,
                _ => {}
            }
        }

        stats.frames = frame + 1;
        if game.is_over() {
            break;
        }
    }

    let snapshot = game.snapshot();
    stats.left_score = snapshot.left.score;
    stats.right_score = snapshot.right.score;
    stats.rounds_played = snapshot.current_round;
    stats.winner = snapshot.winner;
    stats.timed_out = !game.is_over();
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duel::{FixedRoll, PointsToWin};

    #[test]
    fn test_measure_distance_matches_fixed_roll() {
        let mut roll = FixedRoll(50.0);
        let near = measure_distance(1, 20, &mut roll).unwrap();
        assert_eq!(near.hits, 20);
        let far = measure_distance(4, 20, &mut roll).unwrap();
        assert_eq!(far.hits, 0);
    }

    #[test]
    fn test_out_of_reach_never_hits() {
        let mut roll = RngRoll::seeded(3);
        for distance in 8..=10 {
            let stats = measure_distance(distance, 500, &mut roll).unwrap();
            assert_eq!(stats.hits, 0);
        }
    }

    #[test]
    fn test_script_presses_on_interval() {
        let script = DuelScript {
            side: Side::Right,
            pattern: RIGHT_PATTERN,
            interval: 9,
            offset: 3,
        };
        assert!(script.press_at(0).is_none());
        assert_eq!(
            script.press_at(3),
            Some(Intent::Move {
                side: Side::Right,
                forward: true
            })
        );
        assert!(script.press_at(4).is_none());
        assert_eq!(script.press_at(3 + 9 * 3), Some(Intent::Lunge(Side::Right)));
    }

    #[test]
    fn test_duel_is_reproducible() {
        let config = SimConfig::with_duels(1, PointsToWin::Five);
        let a = run_duel(&config, 11).unwrap();
        let b = run_duel(&config, 11).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seeded_simulation_report() {
        let config = SimConfig {
            trials_per_distance: 200,
            seed: Some(5),
            verbosity: 0,
            ..SimConfig::default()
        };
        let report = run_simulation(&config).unwrap();
        assert_eq!(report.distances.len(), 9);
        assert!(report.duels.is_none());
    }
}
