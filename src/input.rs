//! Keyboard mapping for the match screen.
//!
//! Both fencers share one keyboard. Player 1 sits on the left of the strip
//! and uses the letter cluster; player 2 uses the arrow keys and `/`.

use fencing::duel::{Intent, Side};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// Translate one key press into a match intent.
///
/// Release and repeat events are ignored so a held key does not replay an
/// action on terminals that report them.
pub fn match_intent(key: KeyEvent) -> Option<Intent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let intent = match key.code {
        // Player 1
        KeyCode::Char('w') | KeyCode::Char('W') => Intent::Lunge(Side::Left),
        KeyCode::Char('e') | KeyCode::Char('E') => Intent::Fleche(Side::Left),
        KeyCode::Char('s') | KeyCode::Char('S') => Intent::Defend(Side::Left),
        KeyCode::Char('d') | KeyCode::Char('D') => Intent::Move {
            side: Side::Left,
            forward: true,
        },
        KeyCode::Char('a') | KeyCode::Char('A') => Intent::Move {
            side: Side::Left,
            forward: false,
        },

        // Player 2 (forward is toward the left edge)
        KeyCode::Up => Intent::Lunge(Side::Right),
        KeyCode::Char('/') => Intent::Fleche(Side::Right),
        KeyCode::Down => Intent::Defend(Side::Right),
        KeyCode::Left => Intent::Move {
            side: Side::Right,
            forward: true,
        },
        KeyCode::Right => Intent::Move {
            side: Side::Right,
            forward: false,
        },

        KeyCode::Esc => Intent::Quit,
        _ => return None,
    };
    Some(intent)
}

/// Controls legend shown under the strip, one entry per fencer.
pub const PLAYER_ONE_CONTROLS: &[(&str, &str)] = &[
    ("[W]", "Lunge"),
    ("[E]", "Fleche"),
    ("[S]", "Parry"),
    ("[A/D]", "Move"),
];

pub const PLAYER_TWO_CONTROLS: &[(&str, &str)] = &[
    ("[Up]", "Lunge"),
    ("[/]", "Fleche"),
    ("[Down]", "Parry"),
    ("[Left/Right]", "Move"),
];
