//! Combat resolution: starting actions, per-frame animation stepping and strike
//! outcomes.
//!
//! Everything here is stateless and operates on the two fencers passed in.
//! Rejected actions (busy, on cooldown, blocked step) return `false` and
//! change nothing.

use super::probability::hit_chance;
use super::roll::HitRoll;
use super::types::{Action, ActionKind, ActorState, Side};
use crate::core::constants::{FLECHE_STEP_FRAMES, FLECHE_STRIKE_FRAME, LUNGE_REACH_FRAME};
use crate::error::MatchResult;
use serde::{Deserialize, Serialize};

/// How a resolved strike ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrikeOutcome {
    Hit,
    Miss,
    /// Defender was parrying; the roll did not matter.
    Blocked,
}

/// A strike resolved on its reach frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Strike {
    pub attacker: Side,
    pub kind: ActionKind,
    pub distance: i32,
    /// Table chance at `distance`, in percent.
    pub chance: f64,
    pub roll: f64,
    pub outcome: StrikeOutcome,
}

impl Strike {
    pub fn is_hit(&self) -> bool {
        self.outcome == StrikeOutcome::Hit
    }
}

/// Start a lunge. Hit resolution happens later, on the reach frame.
pub fn lunge(attacker: &mut ActorState) -> bool {
    attacker.try_start(ActionKind::Lunge)
}

/// Start a fleche. The advance and the strike play out over the animation.
pub fn fleche(attacker: &mut ActorState) -> bool {
    attacker.try_start(ActionKind::Fleche)
}

/// Raise the guard. Any strike landing while it is up is blocked.
pub fn defense(actor: &mut ActorState) -> bool {
    actor.try_start(ActionKind::Defense)
}

/// One-cell footwork step. Only allowed while idle.
pub fn step(mover: &mut ActorState, opponent: &ActorState, forward: bool) -> bool {
    mover.try_move(1, forward, opponent.position)
}

/// What an actor's running action calls for on the frame just advanced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameCue {
    /// A fleche step is due.
    pub step: bool,
    /// The action reached its reach frame.
    pub strike: Option<ActionKind>,
}

/// Roll a strike from `attacker` against `defender` at their current distance
/// and score it. Returns `None` when the fencers overlap, which the movement
/// rules never allow.
pub fn resolve_strike<R: HitRoll + ?Sized>(
    kind: ActionKind,
    attacker: &mut ActorState,
    defender: &ActorState,
    roll: &mut R,
) -> MatchResult<Option<Strike>> {
    let guarded = defender.action.is_defending();
    strike(kind, attacker, defender.position, guarded, roll)
}

/// Roll a strike against a defender standing at `defender_position`.
/// `guarded` is whether the defender's parry counts on this frame. The roll
/// is drawn even when the strike is blocked.
pub fn strike<R: HitRoll + ?Sized>(
    kind: ActionKind,
    attacker: &mut ActorState,
    defender_position: i32,
    guarded: bool,
    roll: &mut R,
) -> MatchResult<Option<Strike>> {
    let distance = (attacker.position - defender_position).abs();
    if distance <= 0 {
        debug_assert!(false, "fencers overlap at {}", attacker.position);
        return Ok(None);
    }

    let chance = hit_chance(distance);
    let roll = roll.roll()?;

    let outcome = if guarded {
        StrikeOutcome::Blocked
    } else if roll < chance {
        StrikeOutcome::Hit
    } else {
        StrikeOutcome::Miss
    };

    if outcome == StrikeOutcome::Hit {
        attacker.score += 1;
    }

    Ok(Some(Strike {
        attacker: attacker.side,
        kind,
        distance,
        chance,
        roll,
        outcome,
    }))
}

/// Tick `actor`'s cooldowns and action counter by one frame and report what
/// the action calls for. Nothing is moved or rolled here.
pub fn advance_timers(actor: &mut ActorState) -> FrameCue {
    if let Some(finished) = actor.advance_frame() {
        tracing::trace!(side = ?actor.side, action = finished.name(), "action finished");
        return FrameCue::default();
    }

    match actor.action {
        Action::Lunging { frame } if frame == LUNGE_REACH_FRAME => FrameCue {
            step: false,
            strike: Some(ActionKind::Lunge),
        },
        Action::Fleche { frame } => FrameCue {
            step: FLECHE_STEP_FRAMES.contains(&frame),
            strike: (frame == FLECHE_STRIKE_FRAME).then_some(ActionKind::Fleche),
        },
        _ => FrameCue::default(),
    }
}

/// Advance `actor` by one frame against a defender who stays put: cooldowns
/// tick down, the running action moves forward, fleche steps are taken and a
/// strike is rolled on its reach frame.
pub fn advance_actor<R: HitRoll + ?Sized>(
    actor: &mut ActorState,
    opponent: &ActorState,
    roll: &mut R,
) -> MatchResult<Option<Strike>> {
    let cue = advance_timers(actor);
    if cue.step && !actor.shift(1, true, opponent.position) {
        tracing::trace!(side = ?actor.side, "fleche step blocked");
    }
    match cue.strike {
        Some(kind) => resolve_strike(kind, actor, opponent, roll),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::*;
    use crate::duel::roll::{FixedRoll, ScriptedRoll};

    fn pair(left_pos: i32, right_pos: i32) -> (ActorState, ActorState) {
        let mut left = ActorState::new(Side::Left);
        let mut right = ActorState::new(Side::Right);
        left.position = left_pos;
        right.position = right_pos;
        (left, right)
    }

    /// Run the attacker's current action to completion, collecting strikes.
    fn run_out(
        attacker: &mut ActorState,
        defender: &ActorState,
        roll: &mut impl HitRoll,
    ) -> Vec<Strike> {
        let mut strikes = Vec::new();
        while !attacker.action.is_idle() {
            if let Some(strike) = advance_actor(attacker, defender, roll).unwrap() {
                strikes.push(strike);
            }
        }
        strikes
    }

    #[test]
    fn test_lunge_resolves_once_on_reach_frame() {
        let (mut left, right) = pair(5, 8);
        let mut roll = FixedRoll(0.0);
        assert!(lunge(&mut left));

        for frame in 1..LUNGE_REACH_FRAME {
            assert!(advance_actor(&mut left, &right, &mut roll).unwrap().is_none());
            assert_eq!(left.action, Action::Lunging { frame });
        }
        let strike = advance_actor(&mut left, &right, &mut roll)
            .unwrap()
            .expect("strike on reach frame");
        assert_eq!(strike.distance, 3);
        assert_eq!(strike.chance, 70.0);
        assert!(strike.is_hit());
        assert_eq!(left.score, 1);

        let rest = run_out(&mut left, &right, &mut roll);
        assert!(rest.is_empty());
        assert_eq!(left.score, 1);
        assert_eq!(left.cooldowns.lunge, LUNGE_COOLDOWN_FRAMES);
    }

    #[test]
    fn test_roll_at_chance_misses() {
        let (mut left, right) = pair(5, 8);
        let mut roll = FixedRoll(70.0);
        lunge(&mut left);
        let strikes = run_out(&mut left, &right, &mut roll);
        assert_eq!(strikes.len(), 1);
        assert_eq!(strikes[0].outcome, StrikeOutcome::Miss);
        assert_eq!(left.score, 0);
    }

    #[test]
    fn test_defense_blocks_any_roll() {
        let (mut left, mut right) = pair(6, 7);
        let mut roll = FixedRoll(0.0);
        assert!(defense(&mut right));
        lunge(&mut left);
        let strikes = run_out(&mut left, &right, &mut roll);
        assert_eq!(strikes[0].outcome, StrikeOutcome::Blocked);
        assert_eq!(left.score, 0);
    }

    #[test]
    fn test_right_side_lunge_scores_for_right() {
        let (left, mut right) = pair(9, 10);
        let mut roll = FixedRoll(10.0);
        lunge(&mut right);
        let strikes = run_out(&mut right, &left, &mut roll);
        assert_eq!(strikes[0].attacker, Side::Right);
        assert!(strikes[0].is_hit());
        assert_eq!(right.score, 1);
    }

    #[test]
    fn test_lunge_rejected_on_cooldown() {
        let (mut left, _) = pair(3, 11);
        left.cooldowns.lunge = 1;
        assert!(!lunge(&mut left));
        assert!(left.action.is_idle());
    }

    #[test]
    fn test_fleche_advances_three_then_strikes() {
        let (mut left, right) = pair(2, 10);
        let mut roll = ScriptedRoll::new([0.0], 99.0);
        assert!(fleche(&mut left));
        let strikes = run_out(&mut left, &right, &mut roll);
        assert_eq!(left.position, 5);
        assert_eq!(strikes.len(), 1);
        assert_eq!(strikes[0].kind, ActionKind::Fleche);
        assert_eq!(strikes[0].distance, 5);
        assert!(strikes[0].is_hit());
        assert_eq!(left.cooldowns.fleche, FLECHE_COOLDOWN_FRAMES);
    }

    #[test]
    fn test_fleche_stops_short_of_opponent() {
        let (left, mut right) = pair(5, 7);
        let mut roll = FixedRoll(99.0);
        fleche(&mut right);
        let strikes = run_out(&mut right, &left, &mut roll);
        assert_eq!(right.position, 6);
        assert_eq!(strikes[0].distance, 1);
        assert_eq!(strikes[0].outcome, StrikeOutcome::Miss);
    }

    #[test]
    fn test_fleche_never_passes_opponent() {
        let (mut left, right) = pair(11, 14);
        let mut roll = FixedRoll(99.0);
        fleche(&mut left);
        run_out(&mut left, &right, &mut roll);
        assert_eq!(left.position, 13);
    }

    #[test]
    fn test_strike_beyond_reach_never_hits() {
        let (mut left, right) = pair(3, 11);
        let mut roll = FixedRoll(0.0);
        lunge(&mut left);
        let strikes = run_out(&mut left, &right, &mut roll);
        assert_eq!(strikes[0].chance, 0.0);
        assert_eq!(strikes[0].outcome, StrikeOutcome::Miss);
    }

    #[test]
    fn test_advance_timers_only_cues() {
        let (mut left, _) = pair(2, 10);
        assert!(fleche(&mut left));

        let mut steps = Vec::new();
        let mut strikes = Vec::new();
        let mut frame = 0;
        while !left.action.is_idle() {
            frame += 1;
            let cue = advance_timers(&mut left);
            if cue.step {
                steps.push(frame);
            }
            if let Some(kind) = cue.strike {
                strikes.push((frame, kind));
            }
        }
        assert_eq!(steps, FLECHE_STEP_FRAMES.to_vec());
        assert_eq!(strikes, vec![(FLECHE_STRIKE_FRAME, ActionKind::Fleche)]);
        assert_eq!(left.position, 2);
        assert_eq!(left.score, 0);
    }

    #[test]
    fn test_step_requires_idle() {
        let (mut left, right) = pair(3, 11);
        assert!(step(&mut left, &right, true));
        assert_eq!(left.position, 4);
        lunge(&mut left);
        assert!(!step(&mut left, &right, true));
        assert_eq!(left.position, 4);
    }
}
