//! Grid-based snake game: the simulation engine plus a thin terminal frontend.

pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod high_score;
pub mod obstacles;
pub mod snake;
pub mod ui;
