use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::View;
use crate::config::PALETTE;

/// Rows taken by the HUD under the board.
pub const HUD_HEIGHT: u16 = 3;

const SEPARATOR: &str = " │ ";

/// Renders score, best, speed, status and helper rows into `area`.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, view: &View<'_>) {
    let [stats_row, status_row, helper_row] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let speed = view.speed_label();
    frame.render_widget(
        Paragraph::new(stats_line(
            view.state.score,
            view.best,
            &speed,
            view.is_new_best(),
            usize::from(stats_row.width),
        ))
        .alignment(Alignment::Center),
        stats_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from(view.banner.status()))
            .alignment(Alignment::Center)
            .style(Style::new().fg(PALETTE.status).bg(PALETTE.background)),
        status_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from(view.banner.helper()))
            .alignment(Alignment::Center)
            .style(Style::new().fg(PALETTE.helper).bg(PALETTE.background)),
        helper_row,
    );
}

fn stats_line(
    score: u32,
    best: u32,
    speed: &str,
    new_best: bool,
    available_width: usize,
) -> Line<'static> {
    let compact = stats_width(score, best, speed, false) > available_width;
    let (score_label, best_label, speed_label) = if compact {
        ("S", "B", "V")
    } else {
        ("Score", "Best", "Speed")
    };

    let label = Style::new().fg(PALETTE.hud_label).bg(PALETTE.background);
    let value = Style::new().fg(PALETTE.hud_value).bg(PALETTE.background);
    let best_style = if new_best {
        Style::new()
            .fg(PALETTE.hud_accent)
            .bg(PALETTE.background)
            .add_modifier(Modifier::BOLD)
    } else {
        value
    };

    Line::from(vec![
        Span::styled(format!("{score_label}: "), label),
        Span::styled(score.to_string(), value),
        Span::styled(SEPARATOR, label),
        Span::styled(format!("{best_label}: "), label),
        Span::styled(best.to_string(), best_style),
        Span::styled(SEPARATOR, label),
        Span::styled(format!("{speed_label}: "), label),
        Span::styled(speed.to_owned(), value),
    ])
}

fn stats_width(score: u32, best: u32, speed: &str, compact: bool) -> usize {
    let text = if compact {
        format!("S: {score}{SEPARATOR}B: {best}{SEPARATOR}V: {speed}")
    } else {
        format!("Score: {score}{SEPARATOR}Best: {best}{SEPARATOR}Speed: {speed}")
    };
    text.width()
}
