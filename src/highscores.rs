//! Best-score persistence
//!
//! The highscore file holds a single decimal integer. Reading never fails:
//! a missing or malformed file simply means there is no highscore yet.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default file name, relative to the working directory
pub const DEFAULT_HIGHSCORE_FILE: &str = "highscore.txt";

/// Parse highscore file contents, falling back to 0
pub fn parse_highscore(text: &str) -> u64 {
    text.trim().parse().unwrap_or(0)
}

/// The persisted best score and where it lives
#[derive(Debug, Clone)]
pub struct HighScore {
    path: PathBuf,
    best: u64,
}

impl HighScore {
    /// Load the highscore from `path`
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = match fs::read_to_string(&path) {
            Ok(text) => {
                let best = parse_highscore(&text);
                if best == 0 && !text.trim().is_empty() && text.trim() != "0" {
                    log::warn!("Ignoring malformed highscore file {}", path.display());
                }
                best
            }
            Err(e) => {
                log::info!("No highscore at {} ({}), starting at 0", path.display(), e);
                0
            }
        };
        Self { path, best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if a score would replace the stored one
    pub fn beaten_by(&self, score: u64) -> bool {
        score > self.best
    }

    /// Store `score` if it strictly beats the current best
    ///
    /// The file is overwritten, never appended. Returns whether it was written.
    pub fn record(&mut self, score: u64) -> io::Result<bool> {
        if !self.beaten_by(score) {
            return Ok(false);
        }
        fs::write(&self.path, score.to_string())?;
        self.best = score;
        log::info!("New highscore {} saved to {}", score, self.path.display());
        Ok(true)
    }
}
