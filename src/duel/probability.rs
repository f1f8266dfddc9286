//! Hit probability keyed by distance between the fencers.
//!
//! Distance is the raw cell difference on the strip. The table is not
//! monotonic: three cells is the lunge sweet spot and beats point-blank range.

use crate::core::constants::{ENGAGEMENT_RANGE, HIT_CHANCE_PERCENT, MAX_REACH};

/// Chance, in percent, that a strike at `distance` lands on an undefended
/// opponent. Zero beyond sword reach and for non-positive distances.
pub fn hit_chance(distance: i32) -> f64 {
    if distance <= 0 || distance > MAX_REACH {
        return 0.0;
    }
    HIT_CHANCE_PERCENT[(distance - 1) as usize]
}

/// Whether `distance` is inside the engagement zone.
pub fn in_range(distance: i32) -> bool {
    (1..=ENGAGEMENT_RANGE).contains(&distance)
}

/// Whether any strike can land from `distance`.
pub fn within_reach(distance: i32) -> bool {
    (1..=MAX_REACH).contains(&distance)
}
