// Strip geometry
pub const MAX_POSITION: i32 = 14;
pub const LEFT_START_POSITION: i32 = 3;
pub const RIGHT_START_POSITION: i32 = 11;

// Frame timing (animations and cooldowns are counted in frames at 30 FPS)
pub const FRAMES_PER_SECOND: u32 = 30;
pub const FRAME_INTERVAL_MS: u64 = 33;

// Lunge: reach frame is the midpoint of the animation
pub const LUNGE_DURATION_FRAMES: u32 = 10;
pub const LUNGE_REACH_FRAME: u32 = 5;
pub const LUNGE_COOLDOWN_FRAMES: u32 = 30; // 1 second

// Fleche: three one-cell steps, then the strike near the end
pub const FLECHE_DURATION_FRAMES: u32 = 15;
pub const FLECHE_ADVANCE: u32 = 3;
pub const FLECHE_STEP_FRAMES: [u32; 3] = [4, 8, 12];
pub const FLECHE_STRIKE_FRAME: u32 = 13;
pub const FLECHE_COOLDOWN_FRAMES: u32 = 150; // 5 seconds

// Defense
pub const DEFENSE_DURATION_FRAMES: u32 = 8; // ~0.25 seconds
pub const DEFENSE_COOLDOWN_FRAMES: u32 = 30;

// Round timing (seconds)
pub const ROUND_DURATION_SECONDS: f64 = 180.0;
pub const SUDDEN_DEATH_SECONDS: f64 = 60.0;
pub const COUNTDOWN_SECONDS: f64 = 3.0;
pub const COUNTDOWN_LABELS: [&str; 3] = ["Ready!", "Set!", "GO!"];

// Longest dt a single tick will honor; larger gaps (suspend, debugger) are clamped
pub const MAX_TICK_SECONDS: f64 = 0.5;

// Hit probability table: index = distance bucket - 1
pub const MAX_REACH: i32 = 7;
pub const HIT_CHANCE_PERCENT: [f64; 7] = [65.0, 60.0, 70.0, 15.0, 7.5, 5.0, 2.5];
pub const ENGAGEMENT_RANGE: i32 = 3;
