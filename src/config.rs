use std::fs;
use std::path::Path;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default number of grid rows.
pub const DEFAULT_ROWS: u16 = 21;

/// Default number of grid columns.
pub const DEFAULT_COLUMNS: u16 = 31;

/// Default terminal columns used to draw one grid cell.
pub const DEFAULT_CELL_WIDTH: u16 = 2;

/// Delay between deferred moves in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 40;

/// Number of cells in a freshly started snake.
pub const DEFAULT_INITIAL_LENGTH: u16 = 5;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub rows: u16,
    pub columns: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.rows) * usize::from(self.columns)
    }
}

/// Background/foreground pair used for the score panel.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct PanelColors {
    pub bg: Color,
    pub fg: Color,
}

/// Colors for every cell state and both panel styles.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Color,
    pub snake: Color,
    pub food: Color,
    pub death: Color,
    pub panel_normal: PanelColors,
    pub panel_defeat: PanelColors,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::Black,
            snake: Color::Rgb(0, 139, 0),
            food: Color::Rgb(139, 69, 19),
            death: Color::Rgb(0, 100, 0),
            panel_normal: PanelColors {
                bg: Color::White,
                fg: Color::Black,
            },
            panel_defeat: PanelColors {
                bg: Color::Red,
                fg: Color::White,
            },
        }
    }
}

/// Everything a game session can be tuned with.
///
/// Missing keys in a config file fall back to the defaults above, so a file
/// containing only `{"wrap": true}` is valid.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: u16,
    pub columns: u16,
    pub cell_width: u16,
    pub wrap: bool,
    pub tick_interval_ms: u64,
    pub initial_length: u16,
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            cell_width: DEFAULT_CELL_WIDTH,
            wrap: false,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            initial_length: DEFAULT_INITIAL_LENGTH,
            palette: Palette::default(),
        }
    }
}

impl GameConfig {
    /// Loads a config from a JSON file. Keys absent from the file keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        GridSize {
            rows: self.rows,
            columns: self.columns,
        }
    }

    /// Checks that the engine can run with these settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                columns: self.columns,
            });
        }

        if self.cell_width == 0 {
            return Err(ConfigError::ZeroCellWidth);
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        if self.initial_length == 0 || self.initial_length > self.columns {
            return Err(ConfigError::InvalidInitialLength {
                length: self.initial_length,
                columns: self.columns,
            });
        }

        let cells = self.grid().total_cells();
        if usize::from(self.initial_length) >= cells {
            return Err(ConfigError::NoRoomForFood {
                length: self.initial_length,
                cells,
            });
        }

        Ok(())
    }
}
