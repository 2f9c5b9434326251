use std::collections::VecDeque;

use crate::config::{GridSize, INITIAL_SNAKE_LENGTH};
use crate::input::{Direction, direction_change_is_valid};

/// Grid cell in logical tile coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the cell lies inside the grid.
    #[must_use]
    pub fn is_within_bounds(self, grid: GridSize) -> bool {
        let tiles = i32::from(grid.tiles);
        self.x >= 0 && self.y >= 0 && self.x < tiles && self.y < tiles
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Snake body plus the current and buffered movement directions.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    buffered_direction: Direction,
}

impl Snake {
    /// Creates a straight snake of `length` cells with its head at `head`,
    /// trailing away from `direction`.
    #[must_use]
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let trailing = direction.opposite();
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut cell = head;
        body.push_back(cell);
        for _ in 1..length {
            cell = cell.step(trailing);
            body.push_back(cell);
        }

        Self {
            body,
            direction,
            buffered_direction: direction,
        }
    }

    /// Starting snake for a fresh game: three cells facing right, head at
    /// two fifths across and half way down.
    #[must_use]
    pub fn initial(grid: GridSize) -> Self {
        let head = Cell::new(i32::from(grid.tiles) * 2 / 5, i32::from(grid.tiles) / 2);
        Self::new(head, Direction::Right, INITIAL_SNAKE_LENGTH)
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>, direction: Direction) -> Self {
        debug_assert!(!segments.is_empty(), "snake needs at least one segment");

        Self {
            body: VecDeque::from(segments),
            direction,
            buffered_direction: direction,
        }
    }

    /// Buffers a turn for the next tick. Returns `false` when the turn would
    /// reverse the current direction; the previously buffered turn stays.
    ///
    /// Only the current direction is checked, not the buffered one, so a
    /// reversal can never sneak in through two quick turns within one tick.
    pub fn buffer_direction(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.direction, direction) {
            return false;
        }
        self.buffered_direction = direction;
        true
    }

    /// Makes the buffered direction current.
    pub fn adopt_buffered_direction(&mut self) {
        self.direction = self.buffered_direction;
    }

    /// Returns the head position one step along the current direction.
    #[must_use]
    pub fn next_head_position(&self) -> Cell {
        self.head().step(self.direction)
    }

    /// Segments a new head could collide with. The tail is left out unless
    /// the snake is about to grow, since it moves out of the way this tick.
    pub fn collision_body(&self, will_grow: bool) -> impl Iterator<Item = &Cell> + '_ {
        let len = if will_grow {
            self.body.len()
        } else {
            self.body.len().saturating_sub(1)
        };
        self.body.iter().take(len)
    }

    /// Pushes `head` and drops the tail unless `grow` is set.
    pub fn advance(&mut self, head: Cell, grow: bool) {
        self.body.push_front(head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

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

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn buffered_direction(&self) -> Direction {
        self.buffered_direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.body.iter()
    }
}
