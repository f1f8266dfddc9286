//! The match controller: owns both fencers and the clock and runs one frame
//! per `tick`.
//!
//! Order within an active frame: burn match time (an expired period is
//! concluded and nothing else happens that frame), apply intents, then advance
//! both fencers. A scoring strike that decides the match ends the frame
//! immediately.

use super::clock::{MatchPhase, RoundClock, RoundVerdict};
use super::combat::{self, Strike};
use super::config::MatchConfig;
use super::intent::Intent;
use super::roll::{HitRoll, RngRoll};
use super::types::{distance, ActionKind, ActorState, Side};
use crate::error::MatchResult;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Something that happened during a tick, for logs and presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MatchEvent {
    /// Countdown over; fencing resumes.
    Fence { round: u32, sudden_death: bool },
    ActionStarted { side: Side, kind: ActionKind },
    Moved { side: Side, position: i32 },
    Strike(Strike),
    /// Regulation time expired and a new round was set up.
    RoundStarted { round: u32 },
    SuddenDeath { extension: u32 },
    MatchWon {
        winner: Side,
        left_score: u32,
        right_score: u32,
    },
    Abandoned,
}

/// Read-only view of the match for one rendered frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSnapshot {
    pub left: ActorState,
    pub right: ActorState,
    pub distance: i32,
    pub phase: MatchPhase,
    pub time_remaining: f64,
    pub current_round: u32,
    pub total_rounds: u32,
    pub points_to_win: u32,
    pub sudden_death: bool,
    pub countdown_label: Option<&'static str>,
    pub winner: Option<Side>,
    pub frame: u64,
}

impl MatchSnapshot {
    pub fn actor(&self, side: Side) -> &ActorState {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

/// One match between two fencers. Construct a fresh controller per match.
#[derive(Debug, Clone)]
pub struct MatchController<R: HitRoll = RngRoll<ChaCha8Rng>> {
    config: MatchConfig,
    actors: [ActorState; 2],
    clock: RoundClock,
    winner: Option<Side>,
    roll: R,
    /// Active frames simulated so far.
    frame: u64,
}

impl MatchController {
    /// New match with rolls drawn from OS entropy.
    pub fn new(config: MatchConfig) -> MatchResult<Self> {
        Self::with_roll(config, RngRoll::from_entropy())
    }

    /// New match with reproducible rolls.
    pub fn seeded(config: MatchConfig, seed: u64) -> MatchResult<Self> {
        Self::with_roll(config, RngRoll::seeded(seed))
    }
}

impl<R: HitRoll> MatchController<R> {
    /// New match with a caller-supplied roll source. Invalid timings fail
    /// here, before the first frame.
    pub fn with_roll(config: MatchConfig, roll: R) -> MatchResult<Self> {
        config.validate()?;
        tracing::info!(
            points_to_win = config.points_to_win.points(),
            total_rounds = config.total_rounds(),
            "match created"
        );
        Ok(Self {
            config,
            actors: [ActorState::new(Side::Left), ActorState::new(Side::Right)],
            clock: RoundClock::new(&config),
            winner: None,
            roll,
            frame: 0,
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn actor(&self, side: Side) -> &ActorState {
        &self.actors[side.index()]
    }

    /// Direct access for scripted setups (tests, replays, the simulator).
    pub fn actor_mut(&mut self, side: Side) -> &mut ActorState {
        &mut self.actors[side.index()]
    }

    pub fn clock(&self) -> &RoundClock {
        &self.clock
    }

    pub fn phase(&self) -> MatchPhase {
        self.clock.phase()
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.clock.phase() == MatchPhase::MatchEnd
    }

    pub fn roll_source(&self) -> &R {
        &self.roll
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        let [left, right] = self.actors;
        MatchSnapshot {
            left,
            right,
            distance: distance(&left, &right),
            phase: self.clock.phase(),
            time_remaining: self.clock.time_remaining(),
            current_round: self.clock.current_round(),
            total_rounds: self.clock.total_rounds(),
            points_to_win: self.config.points_to_win.points(),
            sudden_death: self.clock.is_sudden_death(),
            countdown_label: self.clock.countdown_label(),
            winner: self.winner,
            frame: self.frame,
        }
    }

    /// Process one rendered frame: `intents` gathered since the last frame and
    /// `dt` seconds of wall time. Fails only if the roll source fails.
    pub fn tick(&mut self, intents: &[Intent], dt: f64) -> MatchResult<Vec<MatchEvent>> {
        let mut events = Vec::new();
        if self.is_over() {
            return Ok(events);
        }

        if intents.contains(&Intent::Quit) {
            tracing::info!("match abandoned");
            self.clock.finish();
            events.push(MatchEvent::Abandoned);
            return Ok(events);
        }

        match self.clock.phase() {
            MatchPhase::Countdown | MatchPhase::SuddenDeathCountdown => {
                if self.clock.advance_countdown(dt) {
                    events.push(MatchEvent::Fence {
                        round: self.clock.current_round(),
                        sudden_death: self.clock.is_sudden_death(),
                    });
                }
            }
            MatchPhase::Active => {
                if self.clock.run(dt) {
                    self.conclude_period(&mut events);
                    return Ok(events);
                }
                for intent in intents {
                    self.apply_intent(*intent, &mut events);
                }
                self.advance_frame(&mut events)?;
            }
            MatchPhase::MatchEnd => {}
        }

        Ok(events)
    }

    fn apply_intent(&mut self, intent: Intent, events: &mut Vec<MatchEvent>) {
        let Some(side) = intent.side() else {
            return;
        };
        let (actor, opponent) = split(&mut self.actors, side);

        match intent {
            Intent::Move { forward, .. } => {
                if combat::step(actor, opponent, forward) {
                    events.push(MatchEvent::Moved {
                        side,
                        position: actor.position,
                    });
                }
            }
            Intent::Lunge(_) | Intent::Fleche(_) | Intent::Defend(_) => {
                let (started, kind) = match intent {
                    Intent::Lunge(_) => (combat::lunge(actor), ActionKind::Lunge),
                    Intent::Fleche(_) => (combat::fleche(actor), ActionKind::Fleche),
                    _ => (combat::defense(actor), ActionKind::Defense),
                };
                if started {
                    tracing::debug!(?side, action = kind.name(), "action started");
                    events.push(MatchEvent::ActionStarted { side, kind });
                }
            }
            Intent::Quit => {}
        }
    }

    /// One animation frame for both fencers at once. Timers and fleche steps
    /// advance first; strikes then resolve against the guards that were up
    /// when the frame began, so neither side acts ahead of the other.
    fn advance_frame(&mut self, events: &mut Vec<MatchEvent>) -> MatchResult<()> {
        self.frame += 1;

        let guarded = Side::BOTH.map(|side| self.actor(side).action.is_defending());
        let cues = Side::BOTH.map(|side| combat::advance_timers(self.actor_mut(side)));
        self.take_fleche_steps(cues.map(|cue| cue.step));

        for side in Side::BOTH {
            let Some(kind) = cues[side.index()].strike else {
                continue;
            };
            let defender_guarded = guarded[side.opponent().index()];
            let (actor, opponent) = split(&mut self.actors, side);
            let Some(strike) =
                combat::strike(kind, actor, opponent.position, defender_guarded, &mut self.roll)?
            else {
                continue;
            };

            tracing::debug!(
                ?side,
                action = strike.kind.name(),
                distance = strike.distance,
                chance = strike.chance,
                roll = strike.roll,
                outcome = ?strike.outcome,
                "strike resolved"
            );
            events.push(MatchEvent::Strike(strike));

            if strike.is_hit() && self.check_winner(side, events) {
                break;
            }
        }
        Ok(())
    }

    /// Fleche steps due this frame, checked against where both fencers stood
    /// before it. Two steps that would meet in the same cell both fail.
    fn take_fleche_steps(&mut self, stepping: [bool; 2]) {
        let mut targets = Side::BOTH.map(|side| {
            let actor = self.actor(side);
            let opponent = self.actor(side.opponent());
            stepping[side.index()]
                .then(|| actor.shift_target(1, true, opponent.position))
                .flatten()
        });
        if let [Some(left), Some(right)] = targets {
            if left >= right {
                targets = [None, None];
            }
        }

        for side in Side::BOTH {
            if !stepping[side.index()] {
                continue;
            }
            match targets[side.index()] {
                Some(target) => self.actor_mut(side).position = target,
                None => tracing::trace!(?side, "fleche step blocked"),
            }
        }
    }

    /// After `scorer` lands a hit: end the match if the threshold is reached,
    /// or on any hit during sudden death.
    fn check_winner(&mut self, scorer: Side, events: &mut Vec<MatchEvent>) -> bool {
        let score = self.actor(scorer).score;
        if self.clock.is_sudden_death() || score >= self.config.points_to_win.points() {
            self.declare_winner(scorer, events);
            return true;
        }
        false
    }

    fn conclude_period(&mut self, events: &mut Vec<MatchEvent>) {
        let left_score = self.actor(Side::Left).score;
        let right_score = self.actor(Side::Right).score;

        match self.clock.conclude(left_score, right_score) {
            RoundVerdict::NextRound { round } => {
                for actor in &mut self.actors {
                    actor.reset_for_round();
                }
                tracing::info!(round, left_score, right_score, "round started");
                events.push(MatchEvent::RoundStarted { round });
            }
            RoundVerdict::SuddenDeath { extension } => {
                tracing::info!(extension, score = left_score, "scores level, sudden death");
                events.push(MatchEvent::SuddenDeath { extension });
            }
            RoundVerdict::Decided { winner } => self.declare_winner(winner, events),
        }
    }

    fn declare_winner(&mut self, winner: Side, events: &mut Vec<MatchEvent>) {
        self.clock.finish();
        self.winner = Some(winner);
        let left_score = self.actor(Side::Left).score;
        let right_score = self.actor(Side::Right).score;
        tracing::info!(
            winner = winner.player_number(),
            left_score,
            right_score,
            "match won"
        );
        events.push(MatchEvent::MatchWon {
            winner,
            left_score,
            right_score,
        });
    }
}

/// Borrow `side`'s fencer mutably and the opponent immutably.
fn split(actors: &mut [ActorState; 2], side: Side) -> (&mut ActorState, &ActorState) {
    let [left, right] = actors;
    match side {
        Side::Left => (left, &*right),
        Side::Right => (right, &*left),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::*;
    use crate::duel::roll::FixedRoll;

    fn active_match(points: u32, roll: f64) -> MatchController<FixedRoll> {
        let mut game =
            MatchController::with_roll(MatchConfig::for_points(points).unwrap(), FixedRoll(roll))
                .unwrap();
        let events = game.tick(&[], COUNTDOWN_SECONDS).unwrap();
        assert!(matches!(events[..], [MatchEvent::Fence { round: 1, .. }]));
        game
    }

    const DT: f64 = 1.0 / 30.0;

    #[test]
    fn test_inputs_ignored_during_countdown() {
        let mut game =
            MatchController::with_roll(MatchConfig::default(), FixedRoll(0.0)).unwrap();
        let events = game
            .tick(&[Intent::Move { side: Side::Left, forward: true }], DT)
            .unwrap();
        assert!(events.is_empty());
        assert_eq!(game.actor(Side::Left).position, LEFT_START_POSITION);
        assert_eq!(game.snapshot().countdown_label, Some("Ready!"));
    }

    #[test]
    fn test_move_intent_emits_event() {
        let mut game = active_match(5, 0.0);
        let events = game
            .tick(&[Intent::Move { side: Side::Right, forward: true }], DT)
            .unwrap();
        assert_eq!(
            events,
            vec![MatchEvent::Moved {
                side: Side::Right,
                position: 10
            }]
        );
    }

    #[test]
    fn test_lunge_scores_through_tick() {
        let mut game = active_match(10, 0.0);
        game.actor_mut(Side::Left).position = 8;
        game.actor_mut(Side::Right).position = 10;

        game.tick(&[Intent::Lunge(Side::Left)], DT).unwrap();
        let mut strikes = Vec::new();
        for _ in 0..LUNGE_DURATION_FRAMES {
            for event in game.tick(&[], DT).unwrap() {
                if let MatchEvent::Strike(strike) = event {
                    strikes.push(strike);
                }
            }
        }
        assert_eq!(strikes.len(), 1);
        assert!(strikes[0].is_hit());
        assert_eq!(game.actor(Side::Left).score, 1);
        assert!(!game.is_over());
    }

    #[test]
    fn test_quit_abandons_without_winner() {
        let mut game = active_match(5, 0.0);
        let events = game.tick(&[Intent::Quit], DT).unwrap();
        assert_eq!(events, vec![MatchEvent::Abandoned]);
        assert!(game.is_over());
        assert_eq!(game.winner(), None);
        assert!(game.tick(&[Intent::Lunge(Side::Left)], DT).unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_reports_state() {
        let game = active_match(15, 0.0);
        let snapshot = game.snapshot();
        assert_eq!(snapshot.phase, MatchPhase::Active);
        assert_eq!(snapshot.total_rounds, 3);
        assert_eq!(snapshot.points_to_win, 15);
        assert_eq!(snapshot.distance, 8);
        assert_eq!(snapshot.actor(Side::Right).position, RIGHT_START_POSITION);
        assert_eq!(snapshot.countdown_label, None);
    }

    #[test]
    fn test_expiry_frame_processes_no_input() {
        let mut game = active_match(10, 0.0);
        let events = game
            .tick(
                &[Intent::Move { side: Side::Left, forward: true }],
                ROUND_DURATION_SECONDS,
            )
            .unwrap();
        assert_eq!(events, vec![MatchEvent::RoundStarted { round: 2 }]);
        assert_eq!(game.actor(Side::Left).position, LEFT_START_POSITION);
    }
}
