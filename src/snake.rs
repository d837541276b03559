use std::collections::VecDeque;

use crate::grid::{Direction, Pos};

/// The player's snake. `body.front()` is the head, `body.back()` the tail.
#[derive(Debug, Clone)]
pub struct Snake {
    start: Pos,
    body: VecDeque<Pos>,
    direction: Direction,
    pending_growth: bool,
}

impl Snake {
    pub fn new(start: Pos) -> Self {
        let mut snake = Snake {
            start,
            body: VecDeque::new(),
            direction: Direction::Right,
            pending_growth: false,
        };
        snake.reset();
        snake
    }

    /// Back to a single cell at the start position, heading right.
    pub fn reset(&mut self) {
        self.body.clear();
        self.body.push_back(self.start);
        self.direction = Direction::Right;
        self.pending_growth = false;
    }

    /// Reversing onto the neck is silently refused, whatever the length.
    /// Returns whether the new heading was taken.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction.opposite() == self.direction {
            return false;
        }
        self.direction = new_direction;
        true
    }

    /// Advance one cell. The tail stays put for exactly one step after `grow`.
    pub fn step(&mut self) {
        let new_head = self.head().offset(self.direction.into());
        self.body.push_front(new_head);

        if self.pending_growth {
            self.pending_growth = false;
        } else {
            self.body.pop_back();
        }
    }

    pub fn grow(&mut self) {
        self.pending_growth = true;
    }

    pub fn check_self_collision(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&segment| segment == head)
    }

    pub fn head(&self) -> Pos {
        // body is never empty after construction
        self.body[0]
    }

    pub fn body(&self) -> &VecDeque<Pos> {
        &self.body
    }

    pub fn occupies(&self, pos: Pos) -> bool {
        self.body.contains(&pos)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn start(&self) -> Pos {
        self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_DIRECTIONS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    fn snake_with_body(body: &[(i32, i32)], direction: Direction) -> Snake {
        Snake {
            start: Pos::new(10, 10),
            body: body.iter().map(|&p| Pos::from(p)).collect(),
            direction,
            pending_growth: false,
        }
    }

    #[test]
    fn test_new_snake() {
        let snake = Snake::new(Pos::new(10, 10));

        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Pos::new(10, 10));
        assert_eq!(snake.direction(), Direction::Right);
        assert!(!snake.pending_growth);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut snake = snake_with_body(&[(3, 3), (3, 4), (3, 5)], Direction::Up);
        snake.grow();

        snake.reset();

        assert_eq!(snake.body().iter().copied().collect::<Vec<_>>(), vec![Pos::new(10, 10)]);
        assert_eq!(snake.direction(), Direction::Right);
        assert!(!snake.pending_growth);
    }

    #[test]
    fn test_reversal_rejected_for_all_directions() {
        for dir in ALL_DIRECTIONS {
            let mut snake = snake_with_body(&[(5, 5)], dir);
            assert!(!snake.set_direction(dir.opposite()));
            assert_eq!(snake.direction(), dir, "reversing {:?} should be refused", dir);
        }
    }

    #[test]
    fn test_turns_accepted() {
        let mut snake = Snake::new(Pos::new(5, 5));

        snake.set_direction(Direction::Up);
        assert_eq!(snake.direction(), Direction::Up);

        snake.set_direction(Direction::Left);
        assert_eq!(snake.direction(), Direction::Left);

        // Same direction is a no-op but not a refusal
        assert!(snake.set_direction(Direction::Left));
        assert_eq!(snake.direction(), Direction::Left);
    }

    #[test]
    fn test_snake_movement() {
        let mut snake = snake_with_body(&[(5, 5), (4, 5), (3, 5)], Direction::Right);

        snake.step();

        assert_eq!(snake.head(), Pos::new(6, 5), "Head should be one step right");
        assert_eq!(snake.len(), 3, "Length remained the same");
        assert_eq!(snake.body()[1], Pos::new(5, 5), "Old head is now the neck");
        assert!(!snake.occupies(Pos::new(3, 5)), "Tail was removed");
    }

    #[test]
    fn test_growth_applies_on_next_step_only() {
        let mut snake = Snake::new(Pos::new(5, 5));

        snake.grow();
        assert_eq!(snake.len(), 1, "grow does not extend immediately");

        snake.step();
        assert_eq!(snake.len(), 2);
        assert!(!snake.pending_growth);

        snake.step();
        assert_eq!(snake.len(), 2, "growth is consumed after one step");
        assert_eq!(snake.head(), Pos::new(7, 5));
        assert_eq!(snake.body()[1], Pos::new(6, 5));
    }

    #[test]
    fn test_snake_self_collision() {
        let snake = snake_with_body(&[(5, 5), (5, 6), (6, 6), (6, 5), (5, 5)], Direction::Up);
        assert!(snake.check_self_collision());

        let snake = snake_with_body(&[(5, 5), (5, 6), (6, 6), (6, 5)], Direction::Up);
        assert!(!snake.check_self_collision());

        // The head never collides with itself
        let snake = snake_with_body(&[(5, 5)], Direction::Up);
        assert!(!snake.check_self_collision());
    }

    #[test]
    fn test_curling_into_itself() {
        let mut snake = snake_with_body(&[(5, 5), (4, 5), (4, 6), (5, 6), (6, 6)], Direction::Right);

        snake.set_direction(Direction::Down);
        snake.grow();
        // head moves to (5, 6), which is still body because the tail is kept this step
        snake.step();

        assert!(snake.check_self_collision());
    }
}
