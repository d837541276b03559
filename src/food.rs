use log::debug;
use rand::Rng;

use crate::grid::{Pos, Size};
use crate::obstacles::ObstacleSet;
use crate::snake::Snake;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Food {
    position: Pos,
}

impl Food {
    pub fn new(position: Pos) -> Self {
        Food { position }
    }

    pub fn position(&self) -> Pos {
        self.position
    }

    /// Move the food to a uniformly random cell not covered by the snake or an obstacle.
    ///
    /// Sampling is rejection-based over the whole grid. A grid with no free cell is a
    /// sizing bug in the caller, so that case panics instead of spinning forever.
    pub fn respawn(&mut self, size: Size, snake: &Snake, obstacles: &ObstacleSet, rng: &mut impl Rng) {
        let is_free = |pos: Pos| !snake.occupies(pos) && !obstacles.contains(pos);

        let free_cells = size.cells().filter(|&pos| is_free(pos)).count();
        assert!(
            free_cells > 0,
            "No free cell left for food on a {}x{} grid (snake length {}, {} obstacles)",
            size.width,
            size.height,
            snake.len(),
            obstacles.len()
        );

        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let pos = Pos {
                x: rng.gen_range(0..size.width),
                y: rng.gen_range(0..size.height),
            };

            if is_free(pos) {
                debug!("Food placed at {:?} after {} attempt(s)", pos, attempts);
                self.position = pos;
                return;
            }
        }
    }
}
