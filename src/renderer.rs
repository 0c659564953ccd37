use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::Frame;

use crate::config::{GameConfig, GridSize, Palette};
use crate::snake::Cell;
use crate::ui::hud::render_hud;
use crate::view::{CellGrid, ColorState, ScorePanel};

/// Height of the score panel below the board, in terminal rows.
pub const PANEL_HEIGHT: u16 = 1;

/// Draws the retained board and score panel, centred in the frame.
pub fn render(frame: &mut Frame<'_>, grid: &CellGrid, panel: &ScorePanel, config: &GameConfig) {
    let size = grid.size();
    let width = size.columns.saturating_mul(config.cell_width);
    let height = size.rows.saturating_add(PANEL_HEIGHT);
    let outer = centered_rect(frame.area(), width, height);

    let [board_area, panel_area] =
        Layout::vertical([Constraint::Length(size.rows), Constraint::Length(PANEL_HEIGHT)])
            .areas(outer);

    render_board(frame, board_area, grid, config);
    render_hud(frame, panel_area, panel);
}

fn render_board(frame: &mut Frame<'_>, area: Rect, grid: &CellGrid, config: &GameConfig) {
    let fill = " ".repeat(usize::from(config.cell_width));
    let size = grid.size();
    let buffer = frame.buffer_mut();

    for (row, states) in (0_i32..).zip(grid.rows()) {
        for (col, state) in (0_i32..).zip(states) {
            let cell = Cell { row, col };
            let Some((x, y)) = logical_to_terminal(area, size, config.cell_width, cell) else {
                continue;
            };

            let style = Style::new().bg(cell_color(*state, &config.palette));
            buffer.set_stringn(x, y, &fill, usize::from(area.right() - x), style);
        }
    }
}

/// Palette color for one cell state.
#[must_use]
pub fn cell_color(state: ColorState, palette: &Palette) -> Color {
    match state {
        ColorState::Background => palette.background,
        ColorState::SnakeBody => palette.snake,
        ColorState::Food => palette.food,
        ColorState::DeathMark => palette.death,
    }
}

fn logical_to_terminal(area: Rect, grid: GridSize, cell_width: u16, cell: Cell) -> Option<(u16, u16)> {
    if !cell.is_within_bounds(grid) {
        return None;
    }

    let x_offset = u16::try_from(cell.col).ok()?.checked_mul(cell_width)?;
    let y_offset = u16::try_from(cell.row).ok()?;

    let x = area.x.saturating_add(x_offset);
    let y = area.y.saturating_add(y_offset);
    if x >= area.right() || y >= area.bottom() {
        return None;
    }

    Some((x, y))
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::Terminal;

    use crate::config::{GameConfig, GridSize};
    use crate::snake::Cell;
    use crate::view::{CellGrid, ColorState, Renderer, ScorePanel};

    use super::{centered_rect, logical_to_terminal, render};

    #[test]
    fn cells_map_to_wide_terminal_columns() {
        let area = Rect::new(4, 2, 20, 5);
        let grid = GridSize {
            rows: 5,
            columns: 10,
        };

        assert_eq!(logical_to_terminal(area, grid, 2, Cell::new(0, 0)), Some((4, 2)));
        assert_eq!(logical_to_terminal(area, grid, 2, Cell::new(3, 7)), Some((18, 5)));
        assert_eq!(logical_to_terminal(area, grid, 2, Cell::new(5, 0)), None);
    }

    #[test]
    fn oversized_board_is_clipped_to_the_frame() {
        let area = Rect::new(0, 0, 10, 4);

        assert_eq!(centered_rect(area, 62, 22), area);
        assert_eq!(centered_rect(area, 4, 2), Rect::new(3, 1, 4, 2));
    }

    #[test]
    fn board_cells_take_palette_colors() {
        let config = GameConfig {
            rows: 3,
            columns: 4,
            initial_length: 2,
            ..GameConfig::default()
        };
        let mut grid = CellGrid::new(config.grid());
        grid.set_cell_color(Cell::new(1, 2), ColorState::Food);
        let panel = ScorePanel::new(config.palette.panel_normal);

        let mut terminal = Terminal::new(TestBackend::new(8, 4)).expect("test terminal");
        terminal
            .draw(|frame| render(frame, &grid, &panel, &config))
            .expect("draw succeeds");

        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(4, 1)].bg, config.palette.food);
        assert_eq!(buffer[(5, 1)].bg, config.palette.food);
        assert_eq!(buffer[(0, 0)].bg, config.palette.background);
        assert_eq!(buffer[(0, 3)].bg, config.palette.panel_normal.bg);
    }
}
