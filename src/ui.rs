//! Terminal presentation: draws engine snapshots and turns key presses into commands.
//!
//! Cosmetic choices (head shape, colors) live here; the engine never sees them.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Flex,
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::engine::{Command, GameState, Snapshot};
use crate::grid::{Direction, Pos};
use crate::obstacles::MapType;

/// Each grid cell is two terminal columns wide so the board looks square.
const CELL_WIDTH: u16 = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HeadShape {
    #[default]
    Block,
    Round,
    Arrow,
}

impl HeadShape {
    pub fn next(self) -> HeadShape {
        match self {
            HeadShape::Block => HeadShape::Round,
            HeadShape::Round => HeadShape::Arrow,
            HeadShape::Arrow => HeadShape::Block,
        }
    }

    fn symbol(self, direction: Direction) -> &'static str {
        match self {
            HeadShape::Block => "█",
            HeadShape::Round => "●",
            HeadShape::Arrow => match direction {
                Direction::Up => "▲",
                Direction::Down => "▼",
                Direction::Left => "◀",
                Direction::Right => "▶",
            },
        }
    }

    fn label(self) -> &'static str {
        match self {
            HeadShape::Block => "Block",
            HeadShape::Round => "Round",
            HeadShape::Arrow => "Arrow",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorScheme {
    #[default]
    Classic,
    Ocean,
    Sunset,
}

impl ColorScheme {
    pub fn next(self) -> ColorScheme {
        match self {
            ColorScheme::Classic => ColorScheme::Ocean,
            ColorScheme::Ocean => ColorScheme::Sunset,
            ColorScheme::Sunset => ColorScheme::Classic,
        }
    }

    /// (body, head)
    fn colors(self) -> (Color, Color) {
        match self {
            ColorScheme::Classic => (Color::Green, Color::LightGreen),
            ColorScheme::Ocean => (Color::Blue, Color::LightCyan),
            ColorScheme::Sunset => (Color::Magenta, Color::Yellow),
        }
    }

    fn label(self) -> &'static str {
        match self {
            ColorScheme::Classic => "Classic",
            ColorScheme::Ocean => "Ocean",
            ColorScheme::Sunset => "Sunset",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Appearance {
    pub head: HeadShape,
    pub colors: ColorScheme,
}

/// What a key press means in the current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Engine(Command),
    CycleHead,
    CycleColors,
}

pub fn action_for_key(key: KeyEvent, state: GameState, map: MapType) -> Option<Action> {
    let command = match state {
        GameState::Menu => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
            KeyCode::Char(' ') | KeyCode::Enter => Command::Start,
            KeyCode::Char(c @ '1'..='3') => Command::SelectDifficulty(c as u8 - b'0'),
            KeyCode::Char('m') => Command::SelectMap(map.toggled()),
            KeyCode::Char('h') => return Some(Action::CycleHead),
            KeyCode::Char('c') => return Some(Action::CycleColors),
            _ => return None,
        },
        GameState::Playing => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
            KeyCode::Up | KeyCode::Char('w') => Command::Move(Direction::Up),
            KeyCode::Down | KeyCode::Char('s') => Command::Move(Direction::Down),
            KeyCode::Left | KeyCode::Char('a') => Command::Move(Direction::Left),
            KeyCode::Right | KeyCode::Char('d') => Command::Move(Direction::Right),
            _ => return None,
        },
        GameState::GameOver => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
            KeyCode::Char('r') | KeyCode::Char(' ') | KeyCode::Enter => Command::Restart,
            _ => return None,
        },
    };
    Some(Action::Engine(command))
}

pub fn render(frame: &mut Frame, snapshot: &Snapshot, appearance: &Appearance) {
    let score_text = match snapshot.state {
        GameState::Menu => format!("SNEKGRID    High Score: {}", snapshot.high_score),
        GameState::Playing | GameState::GameOver => format!(
            "SNEKGRID    High Score: {}    Score: {}    Time: {}s",
            snapshot.high_score, snapshot.score, snapshot.elapsed_secs
        ),
    };

    let layout = Layout::default()
        .direction(layout::Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title + scores
            Constraint::Min(0),    // Game area
        ])
        .split(frame.area());

    frame.render_widget(
        Paragraph::new(score_text)
            .alignment(Alignment::Left)
            .block(Block::default().borders(Borders::ALL)),
        layout[0],
    );

    match snapshot.state {
        GameState::Menu => {
            let lines = vec![
                Line::from("Press SPACE to start"),
                Line::from(""),
                Line::from(format!("[1-3] Difficulty: {}", snapshot.difficulty.label())),
                Line::from(format!("[m]   Map: {}", snapshot.map.label())),
                Line::from(format!("[h]   Head: {}", appearance.head.label())),
                Line::from(format!("[c]   Colors: {}", appearance.colors.label())),
                Line::from(""),
                Line::from("[q]   Quit"),
            ];
            frame.render_widget(
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .block(Block::default().title("Menu").borders(Borders::ALL)),
                layout[1],
            );
        }
        GameState::Playing => {
            let title = if snapshot.awaiting_first_input {
                "Press an arrow key to begin"
            } else {
                "Playing"
            };
            let block = Block::default().title(title).borders(Borders::ALL);
            let inner_area = block.inner(layout[1]);

            frame.render_widget(block, layout[1]);
            frame.render_widget(Board { snapshot, appearance }, inner_area);
        }
        GameState::GameOver => {
            let block = Block::default().borders(Borders::ALL);
            let inner_area = block.inner(layout[1]);

            frame.render_widget(block, layout[1]);
            frame.render_widget(Board { snapshot, appearance }, inner_area);
            frame.render_widget(
                Paragraph::new(format!(
                    "GAME OVER\nFinal Score: {}\nPress R to return to the menu",
                    snapshot.score
                ))
                .alignment(Alignment::Center),
                inner_area,
            );
        }
    }
}

struct Board<'a> {
    snapshot: &'a Snapshot<'a>,
    appearance: &'a Appearance,
}

impl Board<'_> {
    fn board_area(&self, area: Rect) -> Rect {
        let width = (self.snapshot.grid.width as u16).saturating_mul(CELL_WIDTH).saturating_add(2);
        let height = (self.snapshot.grid.height as u16).saturating_add(2);
        let [area] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        let [area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        area
    }
}

impl Widget for Board<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered();
        let board = self.board_area(area);
        let cells = block.inner(board);
        block.render(board, buf);

        let mut canvas = Canvas {
            area: cells,
            buf,
            grid: self.snapshot.grid,
        };
        let (body_color, head_color) = self.appearance.colors.colors();

        for &pos in self.snapshot.obstacles.iter() {
            canvas.draw_cell(pos, "▓", Style::default().fg(Color::DarkGray));
        }

        canvas.draw_cell(self.snapshot.food, "●", Style::default().fg(Color::LightRed));

        for &pos in self.snapshot.snake.iter().skip(1) {
            canvas.draw_cell(pos, " ", Style::default().bg(body_color));
        }

        // Head last so a collision shows the head on top of whatever it hit
        if let Some(&head) = self.snapshot.snake.front() {
            let style = if self.snapshot.state == GameState::GameOver {
                Style::default().fg(Color::Red).bold()
            } else {
                Style::default().fg(head_color)
            };
            canvas.draw_cell(head, self.appearance.head.symbol(self.snapshot.direction), style);
        }
    }
}

struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
    grid: crate::grid::Size,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Pos, symbol: &str, style: Style) {
        if !self.grid.contains(pos) {
            return;
        }
        let x = self.area.x + pos.x as u16 * CELL_WIDTH;
        let y = self.area.y + pos.y as u16;
        for (dx, sym) in [symbol, " "].into_iter().enumerate() {
            let x = x + dx as u16;
            if x >= self.area.right() || y >= self.area.bottom() {
                continue;
            }
            if let Some(cell) = self.buf.cell_mut((x, y)) {
                cell.set_symbol(sym);
                cell.set_style(Style::reset().patch(style));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::engine::GameEngine;
    use crate::high_score::HighScoreStore;
    use crossterm::event::KeyModifiers;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::backend::TestBackend;
    use std::io;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_menu_keys() {
        let state = GameState::Menu;
        assert_eq!(
            action_for_key(key(KeyCode::Char(' ')), state, MapType::Empty),
            Some(Action::Engine(Command::Start))
        );
        assert_eq!(
            action_for_key(key(KeyCode::Char('3')), state, MapType::Empty),
            Some(Action::Engine(Command::SelectDifficulty(3)))
        );
        assert_eq!(
            action_for_key(key(KeyCode::Char('m')), state, MapType::Empty),
            Some(Action::Engine(Command::SelectMap(MapType::Obstacles)))
        );
        assert_eq!(action_for_key(key(KeyCode::Char('h')), state, MapType::Empty), Some(Action::CycleHead));
        assert_eq!(action_for_key(key(KeyCode::Up), state, MapType::Empty), None);
    }

    #[test]
    fn test_playing_keys() {
        let state = GameState::Playing;
        assert_eq!(
            action_for_key(key(KeyCode::Left), state, MapType::Empty),
            Some(Action::Engine(Command::Move(Direction::Left)))
        );
        assert_eq!(
            action_for_key(key(KeyCode::Char('s')), state, MapType::Empty),
            Some(Action::Engine(Command::Move(Direction::Down)))
        );
        assert_eq!(
            action_for_key(key(KeyCode::Esc), state, MapType::Empty),
            Some(Action::Engine(Command::Quit))
        );
        assert_eq!(action_for_key(key(KeyCode::Char('1')), state, MapType::Empty), None);
    }

    #[test]
    fn test_game_over_keys() {
        let state = GameState::GameOver;
        assert_eq!(
            action_for_key(key(KeyCode::Char('r')), state, MapType::Empty),
            Some(Action::Engine(Command::Restart))
        );
        assert_eq!(action_for_key(key(KeyCode::Up), state, MapType::Empty), None);
    }

    struct NoStore;

    impl HighScoreStore for NoStore {
        fn load(&self) -> u32 {
            0
        }

        fn save(&mut self, _score: u32) -> io::Result<()> {
            Ok(())
        }
    }

    fn screen_text(engine: &GameEngine<StdRng>, appearance: &Appearance) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        terminal
            .draw(|f| render(f, &engine.snapshot(), appearance))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn engine() -> GameEngine<StdRng> {
        GameEngine::new_with_rng(GameConfig::default(), Box::new(NoStore), StdRng::seed_from_u64(5))
    }

    #[test]
    fn test_menu_screen_lists_options() {
        let engine = engine();
        let appearance = Appearance {
            head: HeadShape::Arrow,
            colors: ColorScheme::Ocean,
        };

        let text = screen_text(&engine, &appearance);

        assert!(text.contains("Press SPACE to start"));
        assert!(text.contains("Difficulty: Medium"));
        assert!(text.contains("Map: Open field"));
        assert!(text.contains("Head: Arrow"));
        assert!(text.contains("Colors: Ocean"));
    }

    #[test]
    fn test_playing_screen_draws_head() {
        let mut engine = engine();
        engine.handle_command(Command::Start);
        let appearance = Appearance {
            head: HeadShape::Arrow,
            colors: ColorScheme::Classic,
        };

        let text = screen_text(&engine, &appearance);

        assert!(text.contains("Press an arrow key to begin"));
        assert!(text.contains("▶"));
        assert!(text.contains("●"), "food should be visible");
    }

    #[test]
    fn test_appearance_cycles() {
        assert_eq!(HeadShape::Block.next().next().next(), HeadShape::Block);
        assert_eq!(ColorScheme::Classic.next().next().next(), ColorScheme::Classic);
        assert_eq!(HeadShape::Arrow.symbol(Direction::Left), "◀");
    }
}
