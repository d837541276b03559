//! Discrete coordinate space the game is played on.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Size { width, height }
    }

    pub fn area(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    /// True iff `pos` lies inside `[0, width) x [0, height)`.
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    pub fn is_perimeter(&self, pos: Pos) -> bool {
        self.contains(pos)
            && (pos.x == 0 || pos.y == 0 || pos.x == self.width - 1 || pos.y == self.height - 1)
    }

    /// Row-major iterator over every cell in the grid.
    pub fn cells(&self) -> impl Iterator<Item = Pos> {
        let Size { width, height } = *self;
        (0..height).flat_map(move |y| (0..width).map(move |x| Pos { x, y }))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PosDelta {
    pub x: i32,
    pub y: i32,
}

impl From<Direction> for PosDelta {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => PosDelta { x: 0, y: -1 },
            Direction::Down => PosDelta { x: 0, y: 1 },
            Direction::Left => PosDelta { x: -1, y: 0 },
            Direction::Right => PosDelta { x: 1, y: 0 },
        }
    }
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Pos { x, y }
    }

    /// Unbounded step; leaving the grid is detected by the caller.
    pub fn offset(&self, delta: PosDelta) -> Pos {
        Pos {
            x: self.x + delta.x,
            y: self.y + delta.y,
        }
    }
}

impl From<(i32, i32)> for Pos {
    fn from((x, y): (i32, i32)) -> Self {
        Pos { x, y }
    }
}
