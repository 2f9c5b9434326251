use std::io;

use ratatui::backend::Backend;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::{Frame, Terminal};

use crate::app::View;
use crate::config::{
    BORDER_BOARD, GLYPH_FOOD, GLYPH_GRID, GLYPH_SNAKE, GridSize, PALETTE, TILE_WIDTH,
};
use crate::game::{GameState, RunState};
use crate::snake::Cell;
use crate::ui::hud::{HUD_HEIGHT, render_hud};
use crate::ui::menu::{render_game_over_menu, render_pause_menu};

/// Draws complete frames from read-only snapshots.
pub trait Renderer {
    type Error;

    /// Redraws everything from `view`.
    ///
    /// # Errors
    ///
    /// Returns the drawing surface's error when the frame cannot be written.
    fn render(&mut self, view: &View<'_>) -> Result<(), Self::Error>;
}

/// Renderer backed by a ratatui terminal.
#[derive(Debug)]
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
}

impl<B: Backend> TerminalRenderer<B> {
    /// Wraps `backend` in a ratatui terminal.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend size cannot be queried.
    pub fn new(backend: B) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
        })
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    type Error = io::Error;

    fn render(&mut self, view: &View<'_>) -> io::Result<()> {
        self.terminal.draw(|frame| draw(frame, view))?;
        Ok(())
    }
}

/// Renders the full game frame from immutable state.
pub fn draw(frame: &mut Frame<'_>, view: &View<'_>) {
    let area = frame.area();
    frame.render_widget(Block::new().style(Style::new().bg(PALETTE.background)), area);

    let grid = view.state.grid();
    let Some((board_area, hud_area)) = layout(area, grid) else {
        render_too_small(frame, area, grid);
        return;
    };

    let block = Block::bordered()
        .border_set(BORDER_BOARD)
        .border_style(Style::new().fg(PALETTE.border))
        .style(Style::new().bg(PALETTE.background));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_grid_lines(frame, inner, grid);
    render_food(frame, inner, view.state);
    render_snake(frame, inner, view.state);
    render_hud(frame, hud_area, view);

    match view.state.run_state {
        RunState::Paused => render_pause_menu(frame, board_area),
        RunState::GameOver => render_game_over_menu(
            frame,
            board_area,
            view.state.score,
            view.best,
            view.is_new_best(),
            view.state.death_reason,
        ),
        RunState::Running => {}
    }
}

/// Board and HUD rectangles centred in `area`, or `None` when they do not fit.
fn layout(area: Rect, grid: GridSize) -> Option<(Rect, Rect)> {
    let (board_width, board_height) = board_size(grid);
    let total_height = board_height.saturating_add(HUD_HEIGHT);
    if area.width < board_width || area.height < total_height {
        return None;
    }

    let region = Rect {
        x: area.x + (area.width - board_width) / 2,
        y: area.y + (area.height - total_height) / 2,
        width: board_width,
        height: total_height,
    };
    let [board, hud_row] =
        Layout::vertical([Constraint::Length(board_height), Constraint::Length(HUD_HEIGHT)])
            .areas(region);

    // Text rows may run wider than the board.
    let hud = Rect {
        x: area.x,
        width: area.width,
        ..hud_row
    };

    Some((board, hud))
}

/// Board size in terminal cells including the border.
fn board_size(grid: GridSize) -> (u16, u16) {
    (
        grid.tiles.saturating_mul(TILE_WIDTH).saturating_add(2),
        grid.tiles.saturating_add(2),
    )
}

fn render_too_small(frame: &mut Frame<'_>, area: Rect, grid: GridSize) {
    let (width, height) = board_size(grid);
    let message = format!(
        "Terminal too small: need {width}x{} for a {}-tile board. Q quits.",
        height.saturating_add(HUD_HEIGHT),
        grid.tiles
    );
    frame.render_widget(
        Paragraph::new(Line::from(message))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::new().fg(PALETTE.status).bg(PALETTE.background)),
        area,
    );
}

fn render_grid_lines(frame: &mut Frame<'_>, inner: Rect, grid: GridSize) {
    let style = Style::new().fg(PALETTE.grid_line).bg(PALETTE.background);
    let tiles = i32::from(grid.tiles);
    let buffer = frame.buffer_mut();

    for y in 0..tiles {
        for x in 0..tiles {
            if let Some((column, row)) = tile_origin(inner, grid, Cell::new(x, y)) {
                buffer.set_string(column, row, GLYPH_GRID, style);
            }
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let Some((x, y)) = tile_origin(inner, state.grid(), state.food) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(
        x,
        y,
        GLYPH_FOOD,
        Style::new().fg(PALETTE.food).bg(PALETTE.background),
    );
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let grid = state.grid();
    let body = Style::new().fg(PALETTE.snake_body).bg(PALETTE.background);
    let head = Style::new()
        .fg(PALETTE.snake_head)
        .bg(PALETTE.background)
        .add_modifier(Modifier::BOLD);

    let buffer = frame.buffer_mut();
    // Tail first so the head always wins a shared cell.
    let segments: Vec<&Cell> = state.snake.segments().collect();
    for (index, segment) in segments.iter().enumerate().rev() {
        let Some((x, y)) = tile_origin(inner, grid, **segment) else {
            continue;
        };
        let style = if index == 0 { head } else { body };
        buffer.set_string(x, y, GLYPH_SNAKE, style);
    }
}

/// Top-left terminal cell of a grid tile.
fn tile_origin(inner: Rect, grid: GridSize, cell: Cell) -> Option<(u16, u16)> {
    if !cell.is_within_bounds(grid) {
        return None;
    }

    let x_offset = u16::try_from(cell.x).ok()?.checked_mul(TILE_WIDTH)?;
    let y_offset = u16::try_from(cell.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
