/// Error types shared by the library and the terminal front end.

use std::path::PathBuf;

use thiserror::Error;

/// A `GameConfig` that cannot produce a playable session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("pipe gap {gap} leaves no room for a gap offset on a {height}px screen (margin {margin})")]
    EmptyGapRange { height: u32, gap: u32, margin: u32 },
    #[error("ground strip ({ground}px) must be shorter than the screen ({height}px)")]
    GroundTooTall { height: u32, ground: u32 },
    #[error("{field} must be positive")]
    NonPositive { field: &'static str },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("jump strength must be negative (upward), got {0}")]
    JumpNotUpward(f64),
}

#[derive(Error, Debug)]
pub enum HighScoreError {
    #[error("high score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level error for the binary.
#[derive(Error, Debug)]
pub enum FlappyError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
