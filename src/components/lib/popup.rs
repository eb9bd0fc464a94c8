use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    widgets::Clear,
    Frame,
};

/// Clears and returns the centered part of `area` that a popup should be drawn in. Sizes are
/// percentages of `area`.
pub fn popup_area(frame: &mut Frame, area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(width)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    frame.render_widget(Clear, area);
    area
}
