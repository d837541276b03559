use std::path::PathBuf;
use std::time::Duration;

use crate::grid::{Pos, Size};

pub const HIGH_SCORE_FILE: &str = ".snekgrid_high_score.txt";
pub const LOG_FILE: &str = "snekgrid.log";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Menu levels are numbered 1 to 3.
    pub fn from_level(level: u8) -> Option<Difficulty> {
        match level {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// How often the tick source should call `GameEngine::update`.
    pub fn tick_interval(&self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(150),
            Difficulty::Medium => Duration::from_millis(100),
            Difficulty::Hard => Duration::from_millis(50),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub grid: Size,
    pub snake_start: Pos,
    /// Interior blocks scattered on the obstacle map, on top of the walled perimeter.
    pub obstacle_count: usize,
    pub points_per_food: u32,
    pub high_score_file: PathBuf,
    pub log_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid: Size::new(20, 20),
            snake_start: Pos::new(10, 10),
            obstacle_count: 15,
            points_per_food: 10,
            high_score_file: PathBuf::from(HIGH_SCORE_FILE),
            log_file: PathBuf::from(LOG_FILE),
        }
    }
}

impl GameConfig {
    /// Reject layouts where food could run out of room on the first tick.
    pub fn validate(&self) -> Result<(), String> {
        if self.grid.width < 3 || self.grid.height < 3 {
            return Err(format!(
                "Grid must be at least 3x3, got {}x{}",
                self.grid.width, self.grid.height
            ));
        }
        if !self.grid.contains(self.snake_start) || self.grid.is_perimeter(self.snake_start) {
            return Err(format!(
                "Snake start {:?} must be an interior cell of the grid",
                self.snake_start
            ));
        }
        let interior = ((self.grid.width - 2) * (self.grid.height - 2)) as usize;
        // start cell plus at least one cell for food
        if self.obstacle_count + 2 > interior {
            return Err(format!(
                "{} interior obstacles leave no room for food in {} interior cells",
                self.obstacle_count, interior
            ));
        }
        if self.points_per_food == 0 {
            return Err("Points per food must be positive".to_string());
        }
        Ok(())
    }
}
