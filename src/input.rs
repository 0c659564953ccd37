use std::collections::HashMap;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::engine::GamePhase;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit step as `(row, column)` deltas.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Abstract key events delivered by an input source.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum InputEvent {
    Up,
    Down,
    Left,
    Right,
    Confirm,
}

/// What the engine does in response to a bound event.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    Move(Direction),
    Restart,
}

/// Event-to-command table for one game phase.
///
/// The engine swaps in a fresh table on every phase transition, so an event
/// that is unbound in the current phase is simply ignored.
#[derive(Debug, Clone)]
pub struct Bindings {
    table: HashMap<InputEvent, Command>,
}

impl Bindings {
    /// Builds the table that is active while the game is in `phase`.
    #[must_use]
    pub fn for_phase(phase: GamePhase) -> Self {
        let table = match phase {
            GamePhase::Playing => HashMap::from([
                (InputEvent::Up, Command::Move(Direction::Up)),
                (InputEvent::Down, Command::Move(Direction::Down)),
                (InputEvent::Left, Command::Move(Direction::Left)),
                (InputEvent::Right, Command::Move(Direction::Right)),
                (InputEvent::Confirm, Command::Move(Direction::Right)),
            ]),
            GamePhase::Defeated | GamePhase::Won => {
                HashMap::from([(InputEvent::Confirm, Command::Restart)])
            }
        };

        Self { table }
    }

    #[must_use]
    pub fn command_for(&self, event: InputEvent) -> Option<Command> {
        self.table.get(&event).copied()
    }
}

/// Events produced by the terminal front end.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AppEvent {
    Game(InputEvent),
    Quit,
}

/// Maps a terminal key press to an application event.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<AppEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(AppEvent::Quit);
    }

    let event = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => InputEvent::Up,
        KeyCode::Down | KeyCode::Char('s' | 'S') => InputEvent::Down,
        KeyCode::Left | KeyCode::Char('a' | 'A') => InputEvent::Left,
        KeyCode::Right | KeyCode::Char('d' | 'D') => InputEvent::Right,
        KeyCode::Enter => InputEvent::Confirm,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => return Some(AppEvent::Quit),
        _ => return None,
    };

    Some(AppEvent::Game(event))
}

/// Polls crossterm for key presses.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Waits up to `timeout` for the next mapped key press.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<AppEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}
