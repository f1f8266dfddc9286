//! UI-agnostic per-frame input for the match.

use super::types::Side;
use serde::{Deserialize, Serialize};

/// One discrete player intent for a frame. Edge detection (one intent per
/// key press) is the frontend's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Move { side: Side, forward: bool },
    Lunge(Side),
    Fleche(Side),
    Defend(Side),
    Quit,
}

impl Intent {
    pub fn side(&self) -> Option<Side> {
        match *self {
            Intent::Move { side, .. }
            | Intent::Lunge(side)
            | Intent::Fleche(side)
            | Intent::Defend(side) => Some(side),
            Intent::Quit => None,
        }
    }
}
