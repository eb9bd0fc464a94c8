use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Padding, Paragraph, Wrap},
    Frame,
};

use crate::components::traits::renderable::Renderable;

/// Lines of text in the middle of the given area.
pub struct Centered {
    lines: Vec<Line<'static>>,
}

impl Centered {
    pub fn new(msg: Vec<String>) -> Self {
        Centered {
            lines: msg.into_iter().map(Line::raw).collect(),
        }
    }
}

impl Renderable for Centered {
    fn draw(&mut self, frame: &mut Frame, area: Rect) {
        let top = area.height.saturating_sub(self.lines.len() as u16) / 2;
        frame.render_widget(
            Paragraph::new(self.lines.clone())
                .centered()
                .block(Block::default().padding(Padding::new(0, 0, top, 0)))
                .wrap(Wrap { trim: false }),
            area,
        );
    }
}
