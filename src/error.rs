//! Errors surfaced by the fencing engine.
//!
//! Mistimed player actions are never errors; they are silent no-ops. Only match
//! setup and a failing random source can fail.

/// Fatal errors for match setup and frame processing.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("unsupported points to win: {0} (expected 5, 10 or 15)")]
    InvalidPointsToWin(u32),

    #[error("invalid match config: {0}")]
    InvalidConfig(String),

    #[error("failed to read match config: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("failed to parse match config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("random source failed: {0}")]
    RollSource(#[source] rand::Error),
}

pub type MatchResult<T> = Result<T, MatchError>;
