use std::collections::VecDeque;

use log::{debug, error, info};
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::config::{Difficulty, GameConfig};
use crate::food::Food;
use crate::grid::{Direction, Pos, Size};
use crate::high_score::HighScoreStore;
use crate::obstacles::{MapType, ObstacleSet};
use crate::snake::Snake;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Menu,
    Playing,
    GameOver,
}

/// Everything the input layer can ask of the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Start,
    Restart,
    SelectDifficulty(u8),
    SelectMap(MapType),
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandEffect {
    Ignored,
    Applied,
    /// First move of a session; the tick and clock sources should start now.
    TimerStarted,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    OwnBody,
    Obstacle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickResult {
    Idle,      // Not playing, or still waiting for the first move
    Moved,     // Normal movement, no special events
    Ate,       // Ate food, growth armed and score bumped
    GameOver(Collision),
}

/// Read-only view handed to the renderer once per frame.
#[derive(Debug)]
pub struct Snapshot<'a> {
    pub state: GameState,
    pub grid: Size,
    pub snake: &'a VecDeque<Pos>,
    pub direction: Direction,
    pub food: Pos,
    pub obstacles: &'a ObstacleSet,
    pub score: u32,
    pub high_score: u32,
    pub elapsed_secs: u32,
    pub difficulty: Difficulty,
    pub map: MapType,
    pub awaiting_first_input: bool,
}

pub struct GameEngine<R = ThreadRng> {
    config: GameConfig,
    store: Box<dyn HighScoreStore>,
    rng: R,
    state: GameState,
    snake: Snake,
    food: Food,
    obstacles: ObstacleSet,
    score: u32,
    high_score: u32,
    elapsed_secs: u32,
    difficulty: Difficulty,
    selected_map: MapType,
    awaiting_first_input: bool,
}

impl GameEngine<ThreadRng> {
    pub fn new(config: GameConfig, store: Box<dyn HighScoreStore>) -> Self {
        GameEngine::new_with_rng(config, store, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn new_with_rng(config: GameConfig, store: Box<dyn HighScoreStore>, mut rng: R) -> Self {
        let high_score = store.load();
        let snake = Snake::new(config.snake_start);
        let obstacles = ObstacleSet::empty();
        let mut food = Food::new(Pos::new(0, 0));
        food.respawn(config.grid, &snake, &obstacles, &mut rng);

        info!("Engine ready on a {}x{} grid, high score {}", config.grid.width, config.grid.height, high_score);

        GameEngine {
            config,
            store,
            rng,
            state: GameState::Menu,
            snake,
            food,
            obstacles,
            score: 0,
            high_score,
            elapsed_secs: 0,
            difficulty: Difficulty::default(),
            selected_map: MapType::default(),
            awaiting_first_input: false,
        }
    }

    pub fn handle_command(&mut self, command: Command) -> CommandEffect {
        match command {
            Command::Move(direction) => self.change_direction(direction),
            Command::Start => self.start_game(),
            Command::Restart => self.restart_game(),
            Command::SelectDifficulty(level) => self.select_difficulty(level),
            Command::SelectMap(map) => self.select_map(map),
            Command::Quit => {
                info!("Quit requested in {:?}", self.state);
                CommandEffect::Quit
            }
        }
    }

    /// Menu -> Playing. Builds a fresh session and waits for the first move.
    pub fn start_game(&mut self) -> CommandEffect {
        if self.state != GameState::Menu {
            return CommandEffect::Ignored;
        }

        // never let a stale or unreadable file lower the best score seen this run
        self.high_score = self.high_score.max(self.store.load());

        self.snake.reset();
        self.score = 0;
        self.elapsed_secs = 0;
        self.obstacles = ObstacleSet::generate(
            self.selected_map,
            self.config.grid,
            self.snake.start(),
            self.config.obstacle_count,
            &mut self.rng,
        );
        self.food.respawn(self.config.grid, &self.snake, &self.obstacles, &mut self.rng);
        self.awaiting_first_input = true;
        self.state = GameState::Playing;

        info!(
            "Game started: {:?}, {:?} map with {} obstacles",
            self.difficulty,
            self.selected_map,
            self.obstacles.len()
        );
        CommandEffect::Applied
    }

    /// GameOver -> Menu. The next `start_game` rebuilds every piece of session state.
    pub fn restart_game(&mut self) -> CommandEffect {
        if self.state != GameState::GameOver {
            return CommandEffect::Ignored;
        }

        self.snake.reset();
        self.obstacles = ObstacleSet::empty();
        self.score = 0;
        self.elapsed_secs = 0;
        self.awaiting_first_input = false;
        self.state = GameState::Menu;

        info!("Back to menu");
        CommandEffect::Applied
    }

    pub fn change_direction(&mut self, direction: Direction) -> CommandEffect {
        if self.state != GameState::Playing {
            return CommandEffect::Ignored;
        }

        if !self.snake.set_direction(direction) {
            return CommandEffect::Ignored;
        }

        if self.awaiting_first_input {
            self.awaiting_first_input = false;
            self.elapsed_secs = 0;
            debug!("First move {:?}, clock running", direction);
            return CommandEffect::TimerStarted;
        }

        CommandEffect::Applied
    }

    fn select_difficulty(&mut self, level: u8) -> CommandEffect {
        if self.state != GameState::Menu {
            return CommandEffect::Ignored;
        }
        match Difficulty::from_level(level) {
            Some(difficulty) => {
                self.difficulty = difficulty;
                CommandEffect::Applied
            }
            None => CommandEffect::Ignored,
        }
    }

    fn select_map(&mut self, map: MapType) -> CommandEffect {
        if self.state != GameState::Menu {
            return CommandEffect::Ignored;
        }
        self.selected_map = map;
        CommandEffect::Applied
    }

    /// One simulation step.
    ///
    /// Collisions are checked in a fixed order after the move: leaving the grid,
    /// hitting the body, hitting an obstacle, then food.
    pub fn update(&mut self) -> TickResult {
        if self.state != GameState::Playing || self.awaiting_first_input {
            return TickResult::Idle;
        }

        self.snake.step();

        if let Some(collision) = self.fatal_collision() {
            self.game_over(collision);
            return TickResult::GameOver(collision);
        }

        if self.snake.head() == self.food.position() {
            self.snake.grow();
            self.score += self.config.points_per_food;
            self.food.respawn(self.config.grid, &self.snake, &self.obstacles, &mut self.rng);
            return TickResult::Ate;
        }

        TickResult::Moved
    }

    fn fatal_collision(&self) -> Option<Collision> {
        let head = self.snake.head();
        if !self.config.grid.contains(head) {
            Some(Collision::Wall)
        } else if self.snake.check_self_collision() {
            Some(Collision::OwnBody)
        } else if self.obstacles.contains(head) {
            Some(Collision::Obstacle)
        } else {
            None
        }
    }

    fn game_over(&mut self, collision: Collision) {
        self.state = GameState::GameOver;
        info!(
            "Game over ({:?}) with score {} after {}s",
            collision, self.score, self.elapsed_secs
        );

        if self.score > self.high_score {
            self.high_score = self.score;
            if let Err(e) = self.store.save(self.high_score) {
                error!("Error saving high score: {}", e);
            }
        }
    }

    /// Advance the play clock by one second, only while the snake is actually moving.
    pub fn tick_clock(&mut self) -> bool {
        if !self.clock_running() {
            return false;
        }
        self.elapsed_secs += 1;
        true
    }

    pub fn clock_running(&self) -> bool {
        self.state == GameState::Playing && !self.awaiting_first_input
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn selected_map(&self) -> MapType {
        self.selected_map
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    pub fn awaiting_first_input(&self) -> bool {
        self.awaiting_first_input
    }

    pub fn grid_size(&self) -> Size {
        self.config.grid
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            state: self.state,
            grid: self.config.grid,
            snake: self.snake.body(),
            direction: self.snake.direction(),
            food: self.food.position(),
            obstacles: &self.obstacles,
            score: self.score,
            high_score: self.high_score,
            elapsed_secs: self.elapsed_secs,
            difficulty: self.difficulty,
            map: self.selected_map,
            awaiting_first_input: self.awaiting_first_input,
        }
    }
}
