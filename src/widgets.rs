//! Ratatui widgets for the board, the score header and the end screen.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::board::{SIZE, Snapshot};

pub const BACKGROUND: Color = Color::Rgb(187, 173, 160);
pub const TILE_TEXT: Color = Color::Rgb(120, 120, 120);
pub const SCORE_TEXT: Color = Color::Rgb(50, 50, 50);

const GOLD_2048: Color = Color::Rgb(238, 194, 46);

const GAP_X: u16 = 2;
const GAP_Y: u16 = 1;
const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 1;
const MIN_TILE_WIDTH: u16 = 6;
const MAX_TILE_WIDTH: u16 = 10;
const MIN_TILE_HEIGHT: u16 = 3;
const MAX_TILE_HEIGHT: u16 = 5;

/// Background colour of a tile.  Anything past 2048 keeps the 2048 gold.
pub fn tile_color(value: u32) -> Color {
    match value {
        0 => Color::Rgb(205, 193, 180),
        2 => Color::Rgb(238, 228, 218),
        4 => Color::Rgb(242, 224, 200),
        8 => Color::Rgb(242, 177, 121),
        16 => Color::Rgb(245, 149, 99),
        32 => Color::Rgb(246, 124, 95),
        64 => Color::Rgb(246, 94, 59),
        128 => Color::Rgb(237, 207, 114),
        256 => Color::Rgb(237, 204, 97),
        512 => Color::Rgb(237, 200, 80),
        1024 => Color::Rgb(237, 197, 63),
        _ => GOLD_2048,
    }
}

/// Cell dimensions chosen to fit the available area.
#[derive(Debug, Clone, Copy)]
struct Metrics {
    tile_width: u16,
    tile_height: u16,
}

impl Metrics {
    fn fit(area: Rect) -> Self {
        let n = SIZE as u16;
        let tile_width = (area.width.saturating_sub(GAP_X * (n + 1)) / n)
            .clamp(MIN_TILE_WIDTH, MAX_TILE_WIDTH);
        let tile_height = (area
            .height
            .saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT + GAP_Y * (n + 1))
            / n)
            .clamp(MIN_TILE_HEIGHT, MAX_TILE_HEIGHT);
        Metrics {
            tile_width,
            tile_height,
        }
    }

    fn grid_width(self) -> u16 {
        let n = SIZE as u16;
        n * self.tile_width + (n + 1) * GAP_X
    }

    fn grid_height(self) -> u16 {
        let n = SIZE as u16;
        n * self.tile_height + (n + 1) * GAP_Y
    }
}

/// Draws the score header, the 4×4 grid and a controls hint, centred in the
/// area and clipped when the terminal is too small.
pub struct BoardWidget<'a> {
    pub snapshot: &'a Snapshot,
}

impl<'a> BoardWidget<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self { snapshot }
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let m = Metrics::fit(area);
        let width = m.grid_width();
        let height = HEADER_HEIGHT + m.grid_height() + FOOTER_HEIGHT;
        let x0 = area.x + area.width.saturating_sub(width) / 2;
        let y0 = area.y + area.height.saturating_sub(height) / 2;

        let panel = Rect::new(x0, y0, width, HEADER_HEIGHT + m.grid_height()).intersection(area);
        Block::default()
            .style(Style::default().bg(BACKGROUND))
            .render(panel, buf);

        // Score header
        let score_row = Rect::new(x0, y0 + HEADER_HEIGHT / 2, width, 1).intersection(area);
        if !score_row.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                format!("Score: {}", self.snapshot.score),
                Style::default()
                    .fg(SCORE_TEXT)
                    .add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center)
            .render(score_row, buf);
        }

        // Tiles
        let grid_y = y0 + HEADER_HEIGHT;
        for (r, row) in self.snapshot.cells.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                let x = x0 + GAP_X + c as u16 * (m.tile_width + GAP_X);
                let y = grid_y + GAP_Y + r as u16 * (m.tile_height + GAP_Y);
                render_tile(value, Rect::new(x, y, m.tile_width, m.tile_height), area, buf);
            }
        }

        let footer = Rect::new(x0, grid_y + m.grid_height(), width, FOOTER_HEIGHT).intersection(area);
        if !footer.is_empty() {
            Paragraph::new("←↑↓→ move   q quit")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .render(footer, buf);
        }
    }
}

fn render_tile(value: u32, rect: Rect, clip: Rect, buf: &mut Buffer) {
    let color = tile_color(value);
    let visible = rect.intersection(clip);
    if visible.is_empty() {
        return;
    }
    Block::default()
        .style(Style::default().bg(color))
        .render(visible, buf);

    if value == 0 {
        return;
    }
    let label_row = Rect::new(rect.x, rect.y + rect.height / 2, rect.width, 1).intersection(clip);
    if label_row.is_empty() {
        return;
    }
    Paragraph::new(value.to_string())
        .style(
            Style::default()
                .fg(TILE_TEXT)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .render(label_row, buf);
}

/// Render the end-of-game popup with the final score.
pub fn render_game_over_overlay(score: u32, area: Rect, buf: &mut Buffer) {
    let popup_area = centered_rect(60, 40, area);
    Clear.render(popup_area, buf);

    let block = Block::default()
        .title("GAME OVER")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    block.render(popup_area, buf);

    let text = Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Congratulations!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Your Score: {}", score)),
        Line::from(""),
        Line::from("Press Esc to play again"),
        Line::from("Press Q to quit"),
    ]);

    Paragraph::new(text)
        .alignment(Alignment::Center)
        .render(popup_area.inner(Margin::new(2, 1)), buf);
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
