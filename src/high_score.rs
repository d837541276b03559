use std::fs;
use std::io;
use std::path::PathBuf;

use log::error;

/// Where the best score survives between runs.
pub trait HighScoreStore {
    /// Stored high score, `0` when nothing readable is there.
    fn load(&self) -> u32;

    fn save(&mut self, score: u32) -> io::Result<()>;
}

/// Plain text file holding a single integer.
#[derive(Debug, Clone)]
pub struct FileHighScore {
    path: PathBuf,
}

impl FileHighScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileHighScore { path: path.into() }
    }
}

impl HighScoreStore for FileHighScore {
    fn load(&self) -> u32 {
        match fs::read_to_string(&self.path).map(|s| s.trim().parse().unwrap_or(0)) {
            Ok(score) => score,
            Err(e) => {
                error!("Error loading high score from {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        fs::write(&self.path, score.to_string())
    }
}
