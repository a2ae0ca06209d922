pub mod exam;
pub mod intro;
pub mod results;
pub mod screen;

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    Frame,
};

use crate::App;

pub fn draw(app: &mut App, f: &mut Frame) {
    screen::current_screen(app.status()).render(app, f);
}

/// A `width` x `height` box centered in `area`, clamped to it.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

/// First visible row so that `cursor` stays on screen.
pub fn scroll_offset(cursor: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        return cursor;
    }
    (cursor + 1).saturating_sub(visible_rows)
}
