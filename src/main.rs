use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::clock::TimerQueue;
use grid_snake::config::GameConfig;
use grid_snake::engine::GameEngine;
use grid_snake::error::ConfigError;
use grid_snake::input::{AppEvent, InputHandler};
use grid_snake::logging;
use grid_snake::renderer;
use grid_snake::terminal_runtime::{install_panic_hook, AppTerminal, TerminalSession};
use grid_snake::view::{CellGrid, ScorePanel};

/// How long one loop iteration waits for a key before checking timers.
const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(5);

type TerminalEngine = GameEngine<CellGrid, ScorePanel, TimerQueue>;

#[derive(Debug, Parser)]
#[command(name = "grid-snake", version, about = "Classic Snake on a fixed grid")]
struct Cli {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of grid rows.
    #[arg(long)]
    rows: Option<u16>,

    /// Number of grid columns.
    #[arg(long)]
    columns: Option<u16>,

    /// Terminal columns per grid cell.
    #[arg(long)]
    cell_width: Option<u16>,

    /// Re-enter from the opposite edge instead of dying at the wall.
    #[arg(long)]
    wrap: bool,

    /// Milliseconds between moves.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Starting snake length.
    #[arg(long)]
    length: Option<u16>,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Log at debug level.
    #[arg(long)]
    debug: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    match logging::setup(cli.debug) {
        Ok(path) => log::info!("logging to {}", path.display()),
        Err(error) => eprintln!("Logging disabled: {error}"),
    }

    let mut engine = match build_engine(&cli) {
        Ok(engine) => engine,
        Err(error) => {
            eprintln!("Invalid configuration: {error}");
            return Err(io::Error::new(io::ErrorKind::InvalidInput, error));
        }
    };

    install_panic_hook();
    let mut session = TerminalSession::enter()?;
    run(session.terminal_mut(), &mut engine)
}

fn build_engine(cli: &Cli) -> Result<TerminalEngine, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    apply_overrides(&mut config, cli);

    let grid = CellGrid::new(config.grid());
    let panel = ScorePanel::new(config.palette.panel_normal);
    let clock = TimerQueue::new();

    match cli.seed {
        Some(seed) => GameEngine::new_with_seed(config, grid, panel, clock, seed),
        None => GameEngine::new(config, grid, panel, clock),
    }
}

fn apply_overrides(config: &mut GameConfig, cli: &Cli) {
    if let Some(rows) = cli.rows {
        config.rows = rows;
    }
    if let Some(columns) = cli.columns {
        config.columns = columns;
    }
    if let Some(cell_width) = cli.cell_width {
        config.cell_width = cell_width;
    }
    if cli.wrap {
        config.wrap = true;
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_interval_ms = tick_ms;
    }
    if let Some(length) = cli.length {
        config.initial_length = length;
    }
}

fn run(terminal: &mut AppTerminal, engine: &mut TerminalEngine) -> io::Result<()> {
    let mut input = InputHandler::new();
    let started = Instant::now();

    loop {
        terminal.draw(|frame| {
            renderer::render(frame, engine.renderer(), engine.display(), engine.config());
        })?;

        if let Some(event) = input.poll_input(INPUT_POLL_TIMEOUT)? {
            match event {
                AppEvent::Quit => break,
                AppEvent::Game(game_input) => {
                    engine.clock_mut().advance_to(started.elapsed());
                    engine.handle_input(game_input);
                }
            }
        }

        engine.clock_mut().advance_to(started.elapsed());
        while let Some(task) = engine.clock_mut().pop_due() {
            engine.on_timer(task);
        }
    }

    log::info!(
        "quit with score {} (high score {})",
        engine.score(),
        engine.high_score()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{apply_overrides, Cli};
    use grid_snake::config::GameConfig;

    #[test]
    fn flags_override_config_values() {
        let cli = Cli::parse_from(["grid-snake", "--rows", "11", "--wrap", "--tick-ms", "80"]);
        let mut config = GameConfig::default();

        apply_overrides(&mut config, &cli);

        assert_eq!(config.rows, 11);
        assert_eq!(config.columns, 31);
        assert!(config.wrap);
        assert_eq!(config.tick_interval_ms, 80);
    }
}
