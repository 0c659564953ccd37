use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::clock::{Clock, DeferredMove, MoveToken};
use crate::config::{GameConfig, GridSize, PanelColors};
use crate::error::ConfigError;
use crate::food;
use crate::input::{direction_change_is_valid, Bindings, Command, Direction, InputEvent};
use crate::snake::{Cell, Snake};
use crate::view::{ColorState, Renderer, ScoreDisplay};

const PLAYING_MESSAGE: &str = "Arrow Keys to Move";
const DEFEAT_MESSAGE: &str = "Press Enter to Restart";
const WIN_MESSAGE: &str = "Board Cleared! Press Enter to Restart";

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum GamePhase {
    Playing,
    Defeated,
    /// The snake filled the board and no cell is left for food.
    Won,
}

/// Snake game state machine driven by input events and deferred moves.
///
/// The engine never waits. Each accepted move hands one [`DeferredMove`] to
/// the clock; the owner of the clock later passes it back through
/// [`GameEngine::on_timer`]. A newer key press bumps the move token, which
/// turns any move still in flight into a no-op.
#[derive(Debug)]
pub struct GameEngine<R, D, C> {
    config: GameConfig,
    snake: Snake,
    food: Option<Cell>,
    score: u32,
    high_score: u32,
    phase: GamePhase,
    token: MoveToken,
    bindings: Bindings,
    renderer: R,
    display: D,
    clock: C,
    rng: StdRng,
}

impl<R, D, C> GameEngine<R, D, C>
where
    R: Renderer,
    D: ScoreDisplay,
    C: Clock,
{
    /// Validates `config` and starts the first run with an entropy-seeded RNG.
    pub fn new(config: GameConfig, renderer: R, display: D, clock: C) -> Result<Self, ConfigError> {
        Self::with_rng(config, renderer, display, clock, StdRng::from_entropy())
    }

    /// Creates a deterministic engine for tests and reproducible runs.
    pub fn new_with_seed(
        config: GameConfig,
        renderer: R,
        display: D,
        clock: C,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(config, renderer, display, clock, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        config: GameConfig,
        renderer: R,
        display: D,
        clock: C,
        rng: StdRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let snake = Snake::centered(config.grid(), config.initial_length);
        let mut engine = Self {
            config,
            snake,
            food: None,
            score: 0,
            high_score: 0,
            phase: GamePhase::Playing,
            token: MoveToken::default(),
            bindings: Bindings::for_phase(GamePhase::Playing),
            renderer,
            display,
            clock,
            rng,
        };
        engine.start();

        Ok(engine)
    }

    /// Begins a fresh run. The high score survives; everything else resets.
    pub fn start(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.token = self.token.next_run();

        self.apply_panel_style(self.config.palette.panel_normal);
        self.display.set_score_text(&score_text(self.score));
        self.display
            .set_high_score_text(&high_score_text(self.high_score));
        self.display.set_message_text(PLAYING_MESSAGE);

        let grid = self.grid();
        self.snake = Snake::centered(grid, self.config.initial_length);
        for row in 0..i32::from(grid.rows) {
            for col in 0..i32::from(grid.columns) {
                self.renderer
                    .set_cell_color(Cell { row, col }, ColorState::Background);
            }
        }
        self.paint_snake();

        self.food = None;
        self.generate_food();
        self.bindings = Bindings::for_phase(self.phase);

        log::debug!(
            "run {} started: {}x{} grid, wrap {}, snake length {}",
            self.token.run(),
            grid.rows,
            grid.columns,
            self.config.wrap,
            self.snake.len()
        );
    }

    /// Dispatches an input event through the bindings of the current phase.
    pub fn handle_input(&mut self, event: InputEvent) {
        match self.bindings.command_for(event) {
            Some(Command::Move(direction)) => self.request_move(direction),
            Some(Command::Restart) => self.start(),
            None => {}
        }
    }

    /// Turns the snake and moves it one cell right away.
    ///
    /// Ignored once the run is over and when `direction` would reverse the
    /// snake into its own neck. Pressing the current direction still counts
    /// as a fresh move.
    pub fn request_move(&mut self, direction: Direction) {
        if self.phase != GamePhase::Playing {
            return;
        }

        if !direction_change_is_valid(self.snake.direction(), direction) {
            return;
        }

        self.snake.set_direction(direction);
        self.token = self.token.next();
        self.advance(DeferredMove {
            direction,
            token: self.token,
        });
    }

    /// Applies a deferred move handed back by the clock, unless a newer key
    /// press has superseded it.
    pub fn on_timer(&mut self, task: DeferredMove) {
        if task.token != self.token || self.phase != GamePhase::Playing {
            log::trace!(
                "dropping stale move {:?} (current token {:?})",
                task.token,
                self.token
            );
            return;
        }

        self.advance(task);
    }

    /// One simulation step: move, collide, eat, then schedule the next step.
    fn advance(&mut self, task: DeferredMove) {
        let grid = self.grid();
        let mut next = self.snake.head().step(task.direction);

        if !next.is_within_bounds(grid) {
            if !self.config.wrap {
                self.renderer
                    .set_cell_color(self.snake.tail(), ColorState::Background);
                self.defeat();
                return;
            }
            next = next.wrapped(grid);
        }

        if self.snake.bites(next) {
            self.snake.grow_to(next);
            self.defeat();
            return;
        }

        if self.food == Some(next) {
            self.snake.grow_to(next);
            self.renderer.set_cell_color(next, ColorState::SnakeBody);
            self.score += 1;
            self.display.set_score_text(&score_text(self.score));
            self.food = None;
            self.generate_food();
        } else {
            let vacated = self.snake.slide_to(next);
            self.renderer.set_cell_color(vacated, ColorState::Background);
            self.renderer.set_cell_color(next, ColorState::SnakeBody);
        }

        if self.phase == GamePhase::Playing {
            let delay = self.tick_interval();
            self.clock.schedule_once(delay, task);
        }
    }

    fn defeat(&mut self) {
        self.end_run(GamePhase::Defeated);
        self.renderer
            .set_cell_color(self.snake.head(), ColorState::DeathMark);
        self.display.set_message_text(DEFEAT_MESSAGE);

        log::info!(
            "defeated at {:?} with score {} (high score {})",
            self.snake.head(),
            self.score,
            self.high_score
        );
    }

    fn win(&mut self) {
        self.end_run(GamePhase::Won);
        self.display.set_message_text(WIN_MESSAGE);

        log::info!(
            "board cleared with score {} (high score {})",
            self.score,
            self.high_score
        );
    }

    fn end_run(&mut self, phase: GamePhase) {
        self.phase = phase;
        self.bindings = Bindings::for_phase(phase);

        if self.score > self.high_score {
            self.high_score = self.score;
            self.display
                .set_high_score_text(&high_score_text(self.high_score));
        }

        self.apply_panel_style(self.config.palette.panel_defeat);
    }

    /// Places food on a random free cell, or ends the run as a win when the
    /// snake covers the whole board.
    fn generate_food(&mut self) {
        let grid = self.grid();
        match food::spawn_position(&mut self.rng, grid, &self.snake) {
            Some(cell) => {
                self.food = Some(cell);
                self.renderer.set_cell_color(cell, ColorState::Food);
            }
            None => {
                self.food = None;
                self.win();
            }
        }
    }

    /// Moves the food to `cell`. Returns false, leaving the food where it was,
    /// when `cell` is off the board or under the snake.
    pub fn place_food(&mut self, cell: Cell) -> bool {
        if !cell.is_within_bounds(self.grid()) || self.snake.occupies(cell) {
            return false;
        }

        if let Some(old) = self.food.replace(cell) {
            self.renderer.set_cell_color(old, ColorState::Background);
        }
        self.renderer.set_cell_color(cell, ColorState::Food);
        true
    }

    /// Replaces the snake, repainting the board. Food that ends up under the
    /// new body is moved elsewhere.
    pub fn set_snake(&mut self, snake: Snake) {
        for cell in self.snake.segments() {
            self.renderer.set_cell_color(*cell, ColorState::Background);
        }

        self.snake = snake;
        self.paint_snake();

        if let Some(food) = self.food {
            if self.snake.occupies(food) {
                self.generate_food();
            }
        }
    }

    fn paint_snake(&mut self) {
        for cell in self.snake.segments() {
            self.renderer.set_cell_color(*cell, ColorState::SnakeBody);
        }
    }

    fn apply_panel_style(&mut self, colors: PanelColors) {
        self.display.set_panel_style(colors.bg, colors.fg);
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.config.tick_interval_ms)
    }
}

impl<R, D, C> GameEngine<R, D, C> {
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// The snake body, head first.
    ///
    /// After a wall defeat the body still holds the tail cell even though the
    /// grid already shows it as background, and after a self-collision it
    /// holds the bitten cell twice. Treat the body as stale until restart
    /// whenever the phase is [`GamePhase::Defeated`].
    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    #[must_use]
    pub fn token(&self) -> MoveToken {
        self.token
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.config.grid()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn display(&self) -> &D {
        &self.display
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

fn score_text(score: u32) -> String {
    format!("SCORE: {score}")
}

fn high_score_text(high_score: u32) -> String {
    format!("HIGH SCORE: {high_score}")
}
