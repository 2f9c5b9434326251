use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Cell, Snake};

/// Where food goes when the snake covers every cell.
pub const FALLBACK_CELL: Cell = Cell::new(0, 0);

/// Picks a free cell uniformly at random, or [`FALLBACK_CELL`] when the
/// snake fills the grid.
#[must_use]
pub fn place_food<R: Rng + ?Sized>(rng: &mut R, grid: GridSize, snake: &Snake) -> Cell {
    if snake.len() >= grid.total_cells() {
        return FALLBACK_CELL;
    }

    let tiles = i32::from(grid.tiles);
    let candidates: Vec<Cell> = (0..tiles)
        .flat_map(|y| (0..tiles).map(move |x| Cell::new(x, y)))
        .filter(|cell| !snake.occupies(*cell))
        .collect();

    if candidates.is_empty() {
        return FALLBACK_CELL;
    }

    candidates[rng.gen_range(0..candidates.len())]
}
