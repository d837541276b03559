use std::collections::HashSet;

use log::{debug, warn};
use rand::Rng;

use crate::grid::{Pos, Size};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MapType {
    #[default]
    Empty,
    Obstacles,
}

impl MapType {
    pub fn toggled(self) -> MapType {
        match self {
            MapType::Empty => MapType::Obstacles,
            MapType::Obstacles => MapType::Empty,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MapType::Empty => "Open field",
            MapType::Obstacles => "Walled garden",
        }
    }
}

/// Blocked cells for one session. Built at game start, never mutated during play.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObstacleSet {
    cells: HashSet<Pos>,
}

impl ObstacleSet {
    pub fn empty() -> Self {
        ObstacleSet::default()
    }

    /// Build the layout for `map`.
    ///
    /// The obstacle map walls in the whole perimeter and scatters `interior_count`
    /// distinct blocks over the remaining cells, never on `snake_start`.
    pub fn generate(
        map: MapType,
        size: Size,
        snake_start: Pos,
        interior_count: usize,
        rng: &mut impl Rng,
    ) -> Self {
        let mut cells: HashSet<Pos> = match map {
            MapType::Empty => return ObstacleSet::empty(),
            MapType::Obstacles => size.cells().filter(|&pos| size.is_perimeter(pos)).collect(),
        };

        let start_is_interior = size.contains(snake_start) && !size.is_perimeter(snake_start);
        let interior_cells = size.area() - cells.len() - usize::from(start_is_interior);
        let wanted = if interior_count > interior_cells {
            warn!(
                "Requested {} interior obstacles but only {} cells are available",
                interior_count, interior_cells
            );
            interior_cells
        } else {
            interior_count
        };

        let mut placed = 0;
        while placed < wanted {
            let pos = Pos {
                x: rng.gen_range(1..size.width - 1),
                y: rng.gen_range(1..size.height - 1),
            };
            if pos != snake_start && cells.insert(pos) {
                placed += 1;
            }
        }

        debug!(
            "Generated {} obstacles ({} interior) on a {}x{} grid",
            cells.len(),
            placed,
            size.width,
            size.height
        );
        ObstacleSet { cells }
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.cells.contains(&pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pos> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<Pos> for ObstacleSet {
    fn from_iter<I: IntoIterator<Item = Pos>>(iter: I) -> Self {
        ObstacleSet {
            cells: iter.into_iter().collect(),
        }
    }
}
