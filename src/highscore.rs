/// High-score persistence.
///
/// The record is a plain-text file holding one base-10 integer.  Reading
/// never fails toward the caller: a missing file is created with `0`, and
/// unreadable or corrupt contents count as `0`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::entities::GameOutcome;
use crate::error::HighScoreError;

const FILE_NAME: &str = ".flappy_bird_score";

/// Anything that can hold the all-time best score.
pub trait HighScoreStore {
    fn read_high_score(&mut self) -> u32;
    fn write_high_score(&mut self, score: u32) -> Result<(), HighScoreError>;
}

/// `$FLAPPY_HIGH_SCORE_FILE`, falling back to `$HOME/.flappy_bird_score`.
pub fn default_path() -> PathBuf {
    if let Ok(path) = std::env::var("FLAPPY_HIGH_SCORE_FILE") {
        return PathBuf::from(path);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(FILE_NAME)
}

#[derive(Clone, Debug)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> HighScoreError {
        HighScoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl HighScoreStore for HighScoreFile {
    fn read_high_score(&mut self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(contents) => match contents.trim().parse() {
                Ok(score) => score,
                Err(_) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        "high score file is corrupt ({:?}), treating as 0",
                        contents.trim()
                    );
                    0
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if let Err(e) = self.write_high_score(0) {
                    tracing::warn!("could not create high score file: {e}");
                }
                0
            }
            Err(e) => {
                tracing::warn!("{}", self.io_error(e));
                0
            }
        }
    }

    fn write_high_score(&mut self, score: u32) -> Result<(), HighScoreError> {
        fs::write(&self.path, score.to_string()).map_err(|e| self.io_error(e))
    }
}

/// Compare a finished session's score against the stored record, writing
/// it back only on a strict improvement.
pub fn record_outcome(score: u32, store: &mut impl HighScoreStore) -> GameOutcome {
    let previous = store.read_high_score();
    if score <= previous {
        return GameOutcome {
            score,
            high_score: previous,
            new_record: false,
        };
    }

    tracing::info!(score, previous, "new high score");
    if let Err(e) = store.write_high_score(score) {
        tracing::warn!("failed to save high score: {e}");
    }
    GameOutcome {
        score,
        high_score: score,
        new_record: true,
    }
}
