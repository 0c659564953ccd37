use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Cell, Snake};

/// Random draws tried before falling back to a full board scan.
pub const MAX_SAMPLE_ATTEMPTS: usize = 64;

/// Picks a uniformly random cell that the snake does not occupy.
///
/// Tries rejection sampling first, which almost always succeeds on a sparse
/// board. When every draw lands on the snake, the free cells are collected and
/// one is picked from them instead. Returns `None` only when the snake covers
/// the whole grid.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, grid: GridSize, snake: &Snake) -> Option<Cell> {
    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let candidate = random_cell(rng, grid);
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }

    log::warn!(
        "food sampling missed {MAX_SAMPLE_ATTEMPTS} times with snake length {}; scanning board",
        snake.len()
    );
    scan_free_cell(rng, grid, snake)
}

fn random_cell<R: Rng + ?Sized>(rng: &mut R, grid: GridSize) -> Cell {
    Cell {
        row: rng.gen_range(0..i32::from(grid.rows)),
        col: rng.gen_range(0..i32::from(grid.columns)),
    }
}

fn scan_free_cell<R: Rng + ?Sized>(rng: &mut R, grid: GridSize, snake: &Snake) -> Option<Cell> {
    let mut candidates = Vec::new();

    for row in 0..i32::from(grid.rows) {
        for col in 0..i32::from(grid.columns) {
            let cell = Cell { row, col };
            if !snake.occupies(cell) {
                candidates.push(cell);
            }
        }
    }

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::GridSize;
    use crate::input::Direction;

    use super::spawn_position;
    use crate::snake::{Cell, Snake};

    #[test]
    fn food_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::from_segments(
            vec![Cell::new(0, 2), Cell::new(0, 1), Cell::new(0, 0)],
            Direction::Right,
        );
        let grid = GridSize {
            rows: 6,
            columns: 8,
        };

        for _ in 0..100 {
            let food = spawn_position(&mut rng, grid, &snake).expect("board has free cells");
            assert!(!snake.occupies(food));
            assert!(food.is_within_bounds(grid));
        }
    }

    #[test]
    fn nearly_full_board_finds_the_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        let grid = GridSize {
            rows: 3,
            columns: 3,
        };
        // Every cell except the centre.
        let snake = Snake::from_segments(
            vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(0, 2),
                Cell::new(1, 2),
                Cell::new(2, 2),
                Cell::new(2, 1),
                Cell::new(2, 0),
                Cell::new(1, 0),
            ],
            Direction::Right,
        );

        for _ in 0..20 {
            assert_eq!(spawn_position(&mut rng, grid, &snake), Some(Cell::new(1, 1)));
        }
    }

    #[test]
    fn full_board_has_no_food_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = GridSize {
            rows: 1,
            columns: 2,
        };
        let snake = Snake::from_segments(vec![Cell::new(0, 1), Cell::new(0, 0)], Direction::Right);

        assert_eq!(spawn_position(&mut rng, grid, &snake), None);
    }
}
