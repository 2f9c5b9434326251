//! Wall and self collision tests used by the step function.

use crate::config::GridSize;
use crate::snake::Cell;

/// Returns true when `cell` lies outside the grid on either axis.
#[must_use]
pub fn hits_wall(cell: Cell, grid: GridSize) -> bool {
    !cell.is_within_bounds(grid)
}

/// Returns true when `cell` coincides with any of `body`.
#[must_use]
pub fn hits_self<'a, I>(cell: Cell, body: I) -> bool
where
    I: IntoIterator<Item = &'a Cell>,
{
    body.into_iter().any(|segment| *segment == cell)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{hits_self, hits_wall};
    use crate::config::GridSize;
    use crate::snake::Cell;

    #[rstest]
    #[case(Cell::new(0, 0), false)]
    #[case(Cell::new(19, 19), false)]
    #[case(Cell::new(20, 5), true)]
    #[case(Cell::new(5, 20), true)]
    #[case(Cell::new(-1, 5), true)]
    #[case(Cell::new(5, -1), true)]
    fn walls_enclose_the_grid(#[case] cell: Cell, #[case] expected: bool) {
        assert_eq!(hits_wall(cell, GridSize::new(20)), expected);
    }

    #[test]
    fn self_hit_requires_exact_cell() {
        let body = [Cell::new(3, 3), Cell::new(2, 3), Cell::new(2, 4)];

        assert!(hits_self(Cell::new(2, 4), &body));
        assert!(!hits_self(Cell::new(4, 3), &body));
        assert!(!hits_self(Cell::new(4, 3), std::iter::empty()));
    }
}
