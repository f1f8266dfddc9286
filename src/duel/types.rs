//! Fencer data structures: strip orientation, timed actions and per-actor state.

use crate::core::constants::*;
use serde::{Deserialize, Serialize};

/// Which end of the strip a fencer starts on. `Left` is player 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Direction of "forward" on the strip.
    pub fn forward_sign(self) -> i32 {
        match self {
            Side::Left => 1,
            Side::Right => -1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn start_position(self) -> i32 {
        match self {
            Side::Left => LEFT_START_POSITION,
            Side::Right => RIGHT_START_POSITION,
        }
    }

    /// 1-based player number for display.
    pub fn player_number(self) -> u8 {
        match self {
            Side::Left => 1,
            Side::Right => 2,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// The kinds of timed action a fencer can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Lunge,
    Fleche,
    Defense,
}

impl ActionKind {
    pub fn duration(self) -> u32 {
        match self {
            ActionKind::Lunge => LUNGE_DURATION_FRAMES,
            ActionKind::Fleche => FLECHE_DURATION_FRAMES,
            ActionKind::Defense => DEFENSE_DURATION_FRAMES,
        }
    }

    /// Cooldown applied when the action finishes.
    pub fn cooldown(self) -> u32 {
        match self {
            ActionKind::Lunge => LUNGE_COOLDOWN_FRAMES,
            ActionKind::Fleche => FLECHE_COOLDOWN_FRAMES,
            ActionKind::Defense => DEFENSE_COOLDOWN_FRAMES,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ActionKind::Lunge => "lunge",
            ActionKind::Fleche => "fleche",
            ActionKind::Defense => "defense",
        }
    }
}

/// Current timed action. Each variant carries its own frame counter, so an
/// actor cannot be lunging and defending at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Action {
    #[default]
    Idle,
    Lunging { frame: u32 },
    Fleche { frame: u32 },
    Defending { frame: u32 },
}

impl Action {
    pub fn start(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Lunge => Action::Lunging { frame: 0 },
            ActionKind::Fleche => Action::Fleche { frame: 0 },
            ActionKind::Defense => Action::Defending { frame: 0 },
        }
    }

    pub fn kind(&self) -> Option<ActionKind> {
        match self {
            Action::Idle => None,
            Action::Lunging { .. } => Some(ActionKind::Lunge),
            Action::Fleche { .. } => Some(ActionKind::Fleche),
            Action::Defending { .. } => Some(ActionKind::Defense),
        }
    }

    /// Frames elapsed in the current action (0 when idle).
    pub fn frame(&self) -> u32 {
        match *self {
            Action::Idle => 0,
            Action::Lunging { frame } | Action::Fleche { frame } | Action::Defending { frame } => {
                frame
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Action::Idle)
    }

    pub fn is_defending(&self) -> bool {
        matches!(self, Action::Defending { .. })
    }

    fn with_frame(self, frame: u32) -> Self {
        match self {
            Action::Idle => Action::Idle,
            Action::Lunging { .. } => Action::Lunging { frame },
            Action::Fleche { .. } => Action::Fleche { frame },
            Action::Defending { .. } => Action::Defending { frame },
        }
    }
}

/// Per-fencer cooldown counters, in frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cooldowns {
    pub lunge: u32,
    pub fleche: u32,
    pub defense: u32,
}

impl Cooldowns {
    pub fn get(&self, kind: ActionKind) -> u32 {
        match kind {
            ActionKind::Lunge => self.lunge,
            ActionKind::Fleche => self.fleche,
            ActionKind::Defense => self.defense,
        }
    }

    fn set(&mut self, kind: ActionKind, frames: u32) {
        match kind {
            ActionKind::Lunge => self.lunge = frames,
            ActionKind::Fleche => self.fleche = frames,
            ActionKind::Defense => self.defense = frames,
        }
    }

    fn tick(&mut self) {
        self.lunge = self.lunge.saturating_sub(1);
        self.fleche = self.fleche.saturating_sub(1);
        self.defense = self.defense.saturating_sub(1);
    }
}

/// Mutable state of one fencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorState {
    pub side: Side,
    /// Cell on the strip, `0..=MAX_POSITION`.
    pub position: i32,
    pub score: u32,
    pub action: Action,
    pub cooldowns: Cooldowns,
}

impl ActorState {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            position: side.start_position(),
            score: 0,
            action: Action::Idle,
            cooldowns: Cooldowns::default(),
        }
    }

    /// Back to the start line for a new round. Score is kept.
    pub fn reset_for_round(&mut self) {
        self.position = self.side.start_position();
        self.action = Action::Idle;
        self.cooldowns = Cooldowns::default();
    }

    /// Whether `kind` may be started this frame.
    pub fn can_start(&self, kind: ActionKind) -> bool {
        self.action.is_idle() && self.cooldowns.get(kind) == 0
    }

    /// Start `kind` if idle and off cooldown. Returns whether it started.
    pub fn try_start(&mut self, kind: ActionKind) -> bool {
        if !self.can_start(kind) {
            return false;
        }
        self.action = Action::start(kind);
        true
    }

    /// Player-driven step. Rejected while an action is running.
    pub fn try_move(&mut self, amount: u32, forward: bool, opponent_position: i32) -> bool {
        if !self.action.is_idle() {
            return false;
        }
        self.shift(amount, forward, opponent_position)
    }

    /// Shift along the strip without checking the action state. Rejected if
    /// the target cell is off the strip or would touch or pass the opponent.
    pub(crate) fn shift(&mut self, amount: u32, forward: bool, opponent_position: i32) -> bool {
        match self.shift_target(amount, forward, opponent_position) {
            Some(target) => {
                self.position = target;
                true
            }
            None => false,
        }
    }

    /// Cell a shift would land on, or `None` if the shift is not allowed.
    pub(crate) fn shift_target(
        &self,
        amount: u32,
        forward: bool,
        opponent_position: i32,
    ) -> Option<i32> {
        if amount == 0 {
            return None;
        }
        let direction = if forward { 1 } else { -1 } * self.side.forward_sign();
        let target = self.position + direction * amount as i32;

        if !(0..=MAX_POSITION).contains(&target) {
            return None;
        }
        let keeps_order = match self.side {
            Side::Left => target < opponent_position,
            Side::Right => target > opponent_position,
        };
        keeps_order.then_some(target)
    }

    /// Advance cooldowns and the action counter by one frame. Returns the
    /// action that finished on this frame, if any; its cooldown is armed here.
    pub(crate) fn advance_frame(&mut self) -> Option<ActionKind> {
        self.cooldowns.tick();

        let kind = self.action.kind()?;
        let frame = self.action.frame() + 1;
        if frame >= kind.duration() {
            self.action = Action::Idle;
            self.cooldowns.set(kind, kind.cooldown());
            Some(kind)
        } else {
            self.action = self.action.with_frame(frame);
            None
        }
    }
}

/// Absolute distance between two fencers, in strip cells.
pub fn distance(a: &ActorState, b: &ActorState) -> i32 {
    (a.position - b.position).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_actor_at_start_line() {
        let left = ActorState::new(Side::Left);
        let right = ActorState::new(Side::Right);
        assert_eq!(left.position, 3);
        assert_eq!(right.position, 11);
        assert_eq!(distance(&left, &right), 8);
        assert!(left.action.is_idle());
        assert_eq!(left.cooldowns, Cooldowns::default());
    }

    #[test]
    fn test_forward_direction_depends_on_side() {
        let mut left = ActorState::new(Side::Left);
        let mut right = ActorState::new(Side::Right);
        assert!(left.try_move(1, true, right.position));
        assert_eq!(left.position, 4);
        assert!(right.try_move(1, true, left.position));
        assert_eq!(right.position, 10);
        assert!(right.try_move(2, false, left.position));
        assert_eq!(right.position, 12);
    }

    #[test]
    fn test_move_rejected_off_strip() {
        let mut left = ActorState::new(Side::Left);
        left.position = 0;
        assert!(!left.try_move(1, false, 11));
        assert_eq!(left.position, 0);

        let mut right = ActorState::new(Side::Right);
        right.position = MAX_POSITION;
        assert!(!right.try_move(1, false, 3));
        assert_eq!(right.position, MAX_POSITION);
    }

    #[test]
    fn test_move_rejected_on_collision() {
        let mut left = ActorState::new(Side::Left);
        left.position = 6;
        assert!(!left.try_move(1, true, 7));
        assert!(!left.try_move(3, true, 8));
        assert_eq!(left.position, 6);
        assert!(left.try_move(1, true, 8));
        assert_eq!(left.position, 7);
    }

    #[test]
    fn test_move_rejected_while_acting() {
        let mut left = ActorState::new(Side::Left);
        assert!(left.try_start(ActionKind::Defense));
        assert!(!left.try_move(1, true, 11));
        assert_eq!(left.position, 3);
    }

    #[test]
    fn test_zero_amount_is_noop() {
        let mut left = ActorState::new(Side::Left);
        assert!(!left.try_move(0, true, 11));
    }

    #[test]
    fn test_action_runs_for_duration_then_arms_cooldown() {
        let mut actor = ActorState::new(Side::Left);
        assert!(actor.try_start(ActionKind::Lunge));

        for expected in 1..LUNGE_DURATION_FRAMES {
            assert_eq!(actor.advance_frame(), None);
            assert_eq!(actor.action, Action::Lunging { frame: expected });
            assert_eq!(actor.cooldowns.lunge, 0);
        }
        assert_eq!(actor.advance_frame(), Some(ActionKind::Lunge));
        assert!(actor.action.is_idle());
        assert_eq!(actor.cooldowns.lunge, LUNGE_COOLDOWN_FRAMES);
    }

    #[test]
    fn test_cooldown_blocks_restart_until_zero() {
        let mut actor = ActorState::new(Side::Right);
        actor.cooldowns.defense = 2;
        assert!(!actor.try_start(ActionKind::Defense));
        actor.advance_frame();
        assert!(!actor.try_start(ActionKind::Defense));
        actor.advance_frame();
        assert!(actor.try_start(ActionKind::Defense));
    }

    #[test]
    fn test_only_one_action_at_a_time() {
        let mut actor = ActorState::new(Side::Left);
        assert!(actor.try_start(ActionKind::Fleche));
        assert!(!actor.try_start(ActionKind::Lunge));
        assert!(!actor.try_start(ActionKind::Defense));
        assert_eq!(actor.action.kind(), Some(ActionKind::Fleche));
    }

    #[test]
    fn test_reset_for_round_keeps_score() {
        let mut actor = ActorState::new(Side::Left);
        actor.score = 4;
        actor.position = 9;
        actor.cooldowns.fleche = 100;
        actor.action = Action::Defending { frame: 3 };
        actor.reset_for_round();
        assert_eq!(actor.score, 4);
        assert_eq!(actor.position, LEFT_START_POSITION);
        assert!(actor.action.is_idle());
        assert_eq!(actor.cooldowns.fleche, 0);
    }
}
