use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid coordinate as `(row, column)`, 0-indexed from the top-left.
///
/// Signed so a head stepping off the board can be represented before the
/// boundary check rejects or wraps it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    #[must_use]
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns the neighbouring cell one step in `direction`, unbounded.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Returns true when the cell lies inside the grid.
    #[must_use]
    pub fn is_within_bounds(self, grid: GridSize) -> bool {
        self.row >= 0
            && self.col >= 0
            && self.row < i32::from(grid.rows)
            && self.col < i32::from(grid.columns)
    }

    /// Returns this cell wrapped into the grid on both axes.
    #[must_use]
    pub fn wrapped(self, grid: GridSize) -> Self {
        Self {
            row: self.row.rem_euclid(i32::from(grid.rows)),
            col: self.col.rem_euclid(i32::from(grid.columns)),
        }
    }
}

/// Snake body and heading. The front of the body is the head.
///
/// While the game is running the body never repeats a cell. Once a run ends
/// in defeat the body is left as it was at the collision, which may include
/// a vacated tail or a repeated head cell.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
}

impl Snake {
    /// Creates the starting snake: a horizontal segment on the middle row,
    /// heading right, with the body roughly centred on the board.
    #[must_use]
    pub fn centered(grid: GridSize, length: u16) -> Self {
        let length = i32::from(length.clamp(1, grid.columns.max(1)));
        let columns = i32::from(grid.columns);
        let row = i32::from(grid.rows / 2);
        let head_col = (columns / 2 + (length + 1) / 2).min(columns - 1);

        let body = (0..length)
            .map(|offset| Cell::new(row, head_col - offset))
            .collect();

        Self {
            body,
            direction: Direction::Right,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>, direction: Direction) -> Self {
        assert!(!segments.is_empty(), "a snake needs at least one segment");

        Self {
            body: VecDeque::from(segments),
            direction,
        }
    }

    /// Returns the current head cell.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current tail cell.
    #[must_use]
    pub fn tail(&self) -> Cell {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns true if `cell` hits the body once the tail has moved on.
    ///
    /// The tail cell is vacated on the same tick the head moves, so stepping
    /// onto it is legal.
    #[must_use]
    pub fn bites(&self, cell: Cell) -> bool {
        let body_len = self.body.len();
        self.body
            .iter()
            .take(body_len.saturating_sub(1))
            .any(|segment| *segment == cell)
    }

    /// Prepends a new head without dropping the tail.
    pub fn grow_to(&mut self, head: Cell) {
        self.body.push_front(head);
    }

    /// Prepends a new head and drops the tail, returning the vacated cell.
    pub fn slide_to(&mut self, head: Cell) -> Cell {
        self.body.push_front(head);
        self.body
            .pop_back()
            .expect("snake body is non-empty after a push")
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Cell, Snake};

    const DEFAULT_GRID: GridSize = GridSize {
        rows: 21,
        columns: 31,
    };

    #[test]
    fn cell_wrapping_keeps_coordinates_inside_bounds() {
        let grid = GridSize {
            rows: 8,
            columns: 10,
        };

        assert_eq!(Cell::new(3, -1).wrapped(grid), Cell::new(3, 9));
        assert_eq!(Cell::new(8, 4).wrapped(grid), Cell::new(0, 4));
        assert_eq!(Cell::new(-1, 10).wrapped(grid), Cell::new(7, 0));
    }

    #[test]
    fn bounds_check_covers_every_edge() {
        let grid = GridSize {
            rows: 3,
            columns: 4,
        };

        assert!(Cell::new(0, 0).is_within_bounds(grid));
        assert!(Cell::new(2, 3).is_within_bounds(grid));
        assert!(!Cell::new(-1, 0).is_within_bounds(grid));
        assert!(!Cell::new(0, -1).is_within_bounds(grid));
        assert!(!Cell::new(3, 0).is_within_bounds(grid));
        assert!(!Cell::new(0, 4).is_within_bounds(grid));
    }

    #[test]
    fn default_start_matches_classic_layout() {
        let snake = Snake::centered(DEFAULT_GRID, 5);
        let cells: Vec<Cell> = snake.segments().copied().collect();

        assert_eq!(
            cells,
            vec![
                Cell::new(10, 18),
                Cell::new(10, 17),
                Cell::new(10, 16),
                Cell::new(10, 15),
                Cell::new(10, 14),
            ]
        );
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn full_width_start_stays_on_the_board() {
        let grid = GridSize {
            rows: 3,
            columns: 6,
        };
        let snake = Snake::centered(grid, 6);

        assert_eq!(snake.head(), Cell::new(1, 5));
        assert_eq!(snake.tail(), Cell::new(1, 0));
        assert!(snake.segments().all(|cell| cell.is_within_bounds(grid)));
        let unique: HashSet<_> = snake.segments().collect();
        assert_eq!(unique.len(), snake.len());
    }

    #[test]
    fn slide_keeps_length_and_returns_old_tail() {
        let mut snake = Snake::centered(DEFAULT_GRID, 5);
        let next = snake.head().step(Direction::Right);

        let vacated = snake.slide_to(next);

        assert_eq!(vacated, Cell::new(10, 14));
        assert_eq!(snake.head(), Cell::new(10, 19));
        assert_eq!(snake.len(), 5);
    }

    #[test]
    fn growth_keeps_previous_tail() {
        let mut snake = Snake::centered(DEFAULT_GRID, 5);
        let next = snake.head().step(Direction::Right);

        snake.grow_to(next);

        assert_eq!(snake.len(), 6);
        assert_eq!(snake.tail(), Cell::new(10, 14));
    }

    #[test]
    fn tail_cell_does_not_count_as_a_bite() {
        let snake = Snake::from_segments(
            vec![
                Cell::new(1, 1),
                Cell::new(1, 2),
                Cell::new(2, 2),
                Cell::new(2, 1),
            ],
            Direction::Down,
        );

        assert!(!snake.bites(Cell::new(2, 1)));
        assert!(snake.bites(Cell::new(2, 2)));
        assert!(!snake.bites(Cell::new(0, 1)));
    }
}
