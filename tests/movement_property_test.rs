//! Property tests: strip invariants under arbitrary input.
//!
//! Whatever the fencers press, both stay on the strip, player 1 stays strictly
//! left of player 2, and scores only ever go up.

use fencing::core::constants::{COUNTDOWN_SECONDS, MAX_POSITION};
use fencing::duel::{ActorState, Intent, MatchConfig, MatchController, Side};
use proptest::prelude::*;

const DT: f64 = 1.0 / 30.0;

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Left), Just(Side::Right)]
}

fn intent_strategy() -> impl Strategy<Value = Intent> {
    prop_oneof![
        4 => (side_strategy(), any::<bool>())
            .prop_map(|(side, forward)| Intent::Move { side, forward }),
        1 => side_strategy().prop_map(Intent::Lunge),
        1 => side_strategy().prop_map(Intent::Fleche),
        1 => side_strategy().prop_map(Intent::Defend),
    ]
}

/// Up to three intents per frame, or none.
fn frames_strategy() -> impl Strategy<Value = Vec<Vec<Intent>>> {
    prop::collection::vec(prop::collection::vec(intent_strategy(), 0..3), 1..400)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: positions stay on the strip and in order on every frame
    #[test]
    fn prop_positions_stay_ordered(frames in frames_strategy(), seed in any::<u64>()) {
        let mut game = MatchController::seeded(MatchConfig::default(), seed).unwrap();
        game.tick(&[], COUNTDOWN_SECONDS).unwrap();

        for intents in &frames {
            game.tick(intents, DT).unwrap();
            let left = game.actor(Side::Left).position;
            let right = game.actor(Side::Right).position;
            prop_assert!((0..=MAX_POSITION).contains(&left), "left at {}", left);
            prop_assert!((0..=MAX_POSITION).contains(&right), "right at {}", right);
            prop_assert!(left < right, "order broken: {} vs {}", left, right);
        }
    }

    /// Property: scores never decrease and never pass the threshold
    #[test]
    fn prop_scores_monotonic(frames in frames_strategy(), seed in any::<u64>()) {
        let config = MatchConfig::default();
        let threshold = config.points_to_win.points();
        let mut game = MatchController::seeded(config, seed).unwrap();
        game.tick(&[], COUNTDOWN_SECONDS).unwrap();

        let mut last = (0, 0);
        for intents in &frames {
            game.tick(intents, DT).unwrap();
            let now = (game.actor(Side::Left).score, game.actor(Side::Right).score);
            prop_assert!(now.0 >= last.0 && now.1 >= last.1);
            prop_assert!(now.0 <= threshold && now.1 <= threshold);
            last = now;
        }
    }

    /// Property: a single step either moves exactly one cell or changes nothing
    #[test]
    fn prop_step_is_one_cell_or_noop(
        left_pos in 0..=MAX_POSITION,
        gap in 1..=MAX_POSITION,
        forward in any::<bool>(),
        mover_is_left in any::<bool>(),
    ) {
        let right_pos = left_pos + gap;
        prop_assume!(right_pos <= MAX_POSITION);

        let mut left = ActorState::new(Side::Left);
        let mut right = ActorState::new(Side::Right);
        left.position = left_pos;
        right.position = right_pos;

        let (mover, opponent) = if mover_is_left {
            (&mut left, right)
        } else {
            (&mut right, left)
        };
        let before = mover.position;
        let moved = mover.try_move(1, forward, opponent.position);

        if moved {
            prop_assert_eq!((mover.position - before).abs(), 1);
        } else {
            prop_assert_eq!(mover.position, before);
        }
        prop_assert!((0..=MAX_POSITION).contains(&mover.position));
        prop_assert_ne!(mover.position, opponent.position);
    }
}
