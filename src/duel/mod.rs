//! Fencing duel engine.
//!
//! Two fencers on a 15-cell strip trade lunges, fleches and parries. Each
//! action is a short timed animation with a cooldown; strikes are rolled
//! against a distance table on their reach frame. Rounds run on a clock, with
//! sudden death breaking a tie after the last round.

pub mod clock;
pub mod combat;
pub mod config;
pub mod controller;
pub mod intent;
pub mod probability;
pub mod roll;
pub mod types;

pub use clock::{MatchPhase, RoundClock, RoundVerdict};
pub use combat::{Strike, StrikeOutcome};
pub use config::{MatchConfig, PointsToWin};
pub use controller::{MatchController, MatchEvent, MatchSnapshot};
pub use intent::Intent;
pub use probability::hit_chance;
pub use roll::{FixedRoll, HitRoll, RngRoll, ScriptedRoll};
pub use types::{distance, Action, ActionKind, ActorState, Cooldowns, Side};
