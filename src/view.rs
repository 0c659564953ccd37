use ratatui::style::Color;

use crate::config::{GridSize, PanelColors};
use crate::snake::Cell;

/// Logical paint state of one grid cell.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum ColorState {
    #[default]
    Background,
    SnakeBody,
    Food,
    DeathMark,
}

/// Receives cell repaints from the engine.
pub trait Renderer {
    fn set_cell_color(&mut self, cell: Cell, state: ColorState);
}

/// Receives score panel updates from the engine.
pub trait ScoreDisplay {
    fn set_score_text(&mut self, text: &str);
    fn set_high_score_text(&mut self, text: &str);
    fn set_message_text(&mut self, text: &str);
    fn set_panel_style(&mut self, bg: Color, fg: Color);
}

/// Retained grid of cell states, painted by the engine and read by a front end.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CellGrid {
    size: GridSize,
    cells: Vec<ColorState>,
}

impl CellGrid {
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![ColorState::Background; size.total_cells()],
        }
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Returns the state of `cell`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<ColorState> {
        self.index(cell).map(|index| self.cells[index])
    }

    /// Counts cells currently painted `state`.
    #[must_use]
    pub fn count(&self, state: ColorState) -> usize {
        self.cells.iter().filter(|cell| **cell == state).count()
    }

    /// Iterates rows top to bottom, each as a slice of column states.
    pub fn rows(&self) -> impl Iterator<Item = &[ColorState]> {
        self.cells.chunks(usize::from(self.size.columns).max(1))
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        if !cell.is_within_bounds(self.size) {
            return None;
        }

        let row = usize::try_from(cell.row).ok()?;
        let col = usize::try_from(cell.col).ok()?;
        Some(row * usize::from(self.size.columns) + col)
    }
}

impl Renderer for CellGrid {
    fn set_cell_color(&mut self, cell: Cell, state: ColorState) {
        if let Some(index) = self.index(cell) {
            self.cells[index] = state;
        }
    }
}

/// Retained score panel text and styling.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ScorePanel {
    pub score: String,
    pub high_score: String,
    pub message: String,
    pub style: PanelColors,
}

impl ScorePanel {
    #[must_use]
    pub fn new(style: PanelColors) -> Self {
        Self {
            score: String::new(),
            high_score: String::new(),
            message: String::new(),
            style,
        }
    }
}

impl ScoreDisplay for ScorePanel {
    fn set_score_text(&mut self, text: &str) {
        text.clone_into(&mut self.score);
    }

    fn set_high_score_text(&mut self, text: &str) {
        text.clone_into(&mut self.high_score);
    }

    fn set_message_text(&mut self, text: &str) {
        text.clone_into(&mut self.message);
    }

    fn set_panel_style(&mut self, bg: Color, fg: Color) {
        self.style = PanelColors { bg, fg };
    }
}
