use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::TILE_WIDTH;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
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

    /// Unit vector in grid coordinates; `y` grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level commands consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    Turn(Direction),
    TogglePause,
    Restart,
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Maps a key press to a command. Letter keys are case-insensitive.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Up => Some(Command::Turn(Direction::Up)),
        KeyCode::Down => Some(Command::Turn(Direction::Down)),
        KeyCode::Left => Some(Command::Turn(Direction::Left)),
        KeyCode::Right => Some(Command::Turn(Direction::Right)),
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Some(Command::Turn(Direction::Up)),
            's' => Some(Command::Turn(Direction::Down)),
            'a' => Some(Command::Turn(Direction::Left)),
            'd' => Some(Command::Turn(Direction::Right)),
            ' ' => Some(Command::TogglePause),
            'r' => Some(Command::Restart),
            'q' => Some(Command::Quit),
            _ => None,
        },
        _ => None,
    }
}

/// Maps a swipe delta to a direction along its dominant axis.
///
/// Ties go to the vertical axis. A zero-length gesture maps to nothing.
#[must_use]
pub fn swipe_direction(dx: i32, dy: i32) -> Option<Direction> {
    if dx == 0 && dy == 0 {
        return None;
    }

    if dx.abs() > dy.abs() {
        Some(if dx > 0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else {
        Some(if dy > 0 {
            Direction::Down
        } else {
            Direction::Up
        })
    }
}

/// Pairs a press with the following release into one swipe gesture.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeTracker {
    start: Option<(u16, u16)>,
}

impl SwipeTracker {
    pub fn begin(&mut self, column: u16, row: u16) {
        self.start = Some((column, row));
    }

    /// Completes the gesture started by [`SwipeTracker::begin`], if any.
    ///
    /// Horizontal travel is measured in tiles rather than columns so that a
    /// visually square drag does not favour the horizontal axis.
    pub fn finish(&mut self, column: u16, row: u16) -> Option<Direction> {
        let (start_column, start_row) = self.start.take()?;
        let dx = (i32::from(column) - i32::from(start_column)) / i32::from(TILE_WIDTH);
        let dy = i32::from(row) - i32::from(start_row);
        swipe_direction(dx, dy)
    }
}

/// Translates raw terminal events into game commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputMapper {
    swipe: SwipeTracker,
}

impl InputMapper {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map_event(&mut self, event: &Event) -> Option<Command> {
        match event {
            Event::Key(key) => map_key(*key),
            Event::Mouse(mouse) => self.map_mouse(*mouse),
            _ => None,
        }
    }

    fn map_mouse(&mut self, mouse: MouseEvent) -> Option<Command> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.swipe.begin(mouse.column, mouse.row);
                None
            }
            MouseEventKind::Up(MouseButton::Left) => self
                .swipe
                .finish(mouse.column, mouse.row)
                .map(Command::Turn),
            _ => None,
        }
    }
}
