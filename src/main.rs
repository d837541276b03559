use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use snekgrid::config::GameConfig;
use snekgrid::engine::{Command, CommandEffect, GameEngine, GameState};
use snekgrid::high_score::FileHighScore;
use snekgrid::ui::{self, Action, Appearance};

const CLOCK_PERIOD: Duration = Duration::from_secs(1);

fn main() -> Result<(), io::Error> {
    let config = GameConfig::default();

    // Set up logging before anything else
    WriteLogger::init(
        LevelFilter::Info,
        Config::default(),
        File::create(&config.log_file)?,
    )
    .expect("Failed to initialize logger");

    info!("Starting snekgrid");

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(io::Error::new(io::ErrorKind::InvalidInput, e));
    }

    let store = FileHighScore::new(&config.high_score_file);
    let mut engine = GameEngine::new(config, Box::new(store));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut engine);

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!("Game loop failed: {}", e);
    }
    info!("Exiting snekgrid");
    result
}

/// Cooperative loop: one redraw per pass, the simulation tick at the difficulty's
/// cadence and the play clock once per second.
fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, engine: &mut GameEngine) -> io::Result<()> {
    let mut appearance = Appearance::default();
    let mut last_tick = Instant::now();
    let mut last_second = Instant::now();

    // At most one turn per tick, so two quick turns can't fold the snake onto its neck
    let mut ignore_input = false;
    loop {
        terminal.draw(|f| ui::render(f, &engine.snapshot(), &appearance))?;

        let tick_rate = engine.difficulty().tick_interval();
        let wait = tick_rate.saturating_sub(last_tick.elapsed());

        if ignore_input {
            thread::sleep(wait);
        } else if event::poll(wait)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match ui::action_for_key(key, engine.state(), engine.selected_map()) {
                        Some(Action::Engine(command)) => match engine.handle_command(command) {
                            CommandEffect::Quit => break,
                            CommandEffect::TimerStarted => {
                                last_tick = Instant::now();
                                last_second = Instant::now();
                                ignore_input = true;
                            }
                            CommandEffect::Applied if matches!(command, Command::Move(_)) => {
                                ignore_input = true;
                            }
                            _ => {}
                        },
                        Some(Action::CycleHead) => appearance.head = appearance.head.next(),
                        Some(Action::CycleColors) => appearance.colors = appearance.colors.next(),
                        None => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            engine.update();
            last_tick = Instant::now();
            ignore_input = false;
        }

        if !engine.clock_running() {
            last_second = Instant::now();
        } else if last_second.elapsed() >= CLOCK_PERIOD {
            engine.tick_clock();
            last_second += CLOCK_PERIOD;
        }

        if engine.state() != GameState::Playing {
            ignore_input = false;
        }
    }

    Ok(())
}
