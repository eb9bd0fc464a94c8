use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::Rect,
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Clear, Paragraph, Wrap},
    Frame,
};
use tracing::debug;

use crate::{
    components::traits::{ontick::OnTick, renderable::Renderable},
    notifier::{Notification, NotificationKind},
};

const WIDTH: u16 = 48;

struct Toast {
    notification: Notification,
    ticks_left: u32,
}

impl Toast {
    fn body(&self) -> Paragraph<'static> {
        let mut lines = vec![Line::raw(self.notification.message.clone())];
        if let Some(link) = &self.notification.link {
            lines.push(Line::raw(link.clone()).underlined().dim());
        }
        Paragraph::new(lines).wrap(Wrap { trim: true })
    }

    /// Rows needed to show the whole message and link, borders included.
    fn height(&self) -> u16 {
        let lines = self.body().line_count(WIDTH - 2);
        u16::try_from(lines).unwrap_or(u16::MAX).saturating_add(2)
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        let color = match self.notification.kind {
            NotificationKind::Success => Color::Green,
            NotificationKind::Error => Color::Red,
        };
        let block = Block::bordered()
            .title(self.notification.title.clone().bold())
            .border_style(Style::new().fg(color));
        frame.render_widget(Clear, area);
        frame.render_widget(self.body().block(block), area);
    }
}

/// Transient banners stacked in the bottom-right corner. Newest is at the bottom.
pub struct Toasts {
    toasts: Vec<Toast>,
    lifetime: u32,
}

impl Toasts {
    /// `lifetime` is in ticks.
    pub fn new(lifetime: u32) -> Self {
        Self {
            toasts: vec![],
            lifetime: lifetime.max(1),
        }
    }

    pub fn push(&mut self, notification: Notification) {
        debug!(
            "Notification {}: {} / {}",
            notification.key, notification.title, notification.message
        );
        if let Some(existing) = self
            .toasts
            .iter_mut()
            .find(|t| t.notification.key == notification.key)
        {
            existing.notification = notification;
            existing.ticks_left = self.lifetime;
        } else {
            self.toasts.push(Toast {
                notification,
                ticks_left: self.lifetime,
            });
        }
    }

    pub fn dismiss_latest(&mut self) {
        self.toasts.pop();
    }

    pub fn dismiss_all(&mut self) {
        self.toasts.clear();
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.toasts.iter().map(|t| &t.notification)
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl OnTick for Toasts {
    fn on_tick(&mut self) {
        for t in self.toasts.iter_mut() {
            t.ticks_left = t.ticks_left.saturating_sub(1);
        }
        self.toasts.retain(|t| t.ticks_left > 0);
    }
}

impl Renderable for Toasts {
    fn draw(&mut self, frame: &mut Frame, area: Rect) {
        if self.toasts.is_empty() || area.width < WIDTH {
            return;
        }
        let [column] = Layout::horizontal([Constraint::Length(WIDTH)])
            .flex(Flex::End)
            .areas(area);
        // Newest toasts win when the screen is too short for all of them
        let mut bottom = column.bottom();
        for toast in self.toasts.iter().rev() {
            let h = toast.height();
            if bottom < column.y.saturating_add(h) {
                break;
            }
            bottom -= h;
            toast.draw(frame, Rect::new(column.x, bottom, column.width, h));
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::notifier::NotificationKey;

    fn err(key: NotificationKey, msg: &str) -> Notification {
        Notification::error(key, "Error", msg)
    }

    fn render(t: &mut Toasts) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                t.draw(f, area)
            })
            .unwrap();
        terminal
    }

    fn messages(t: &Toasts) -> Vec<String> {
        t.visible().map(|n| n.message.clone()).collect()
    }

    #[test]
    fn same_key_replaces_in_place() {
        let mut t = Toasts::new(10);
        t.push(err(NotificationKey::AuthError, "first"));
        t.push(err(NotificationKey::LoadError, "other"));
        t.push(err(NotificationKey::AuthError, "second"));
        assert_eq!(messages(&t), vec!["second", "other"]);
    }

    #[test]
    fn expire_after_lifetime() {
        let mut t = Toasts::new(2);
        t.push(err(NotificationKey::AuthError, "a"));
        t.on_tick();
        t.push(err(NotificationKey::LoadError, "b"));
        t.on_tick();
        assert_eq!(messages(&t), vec!["b"]);
        t.on_tick();
        assert!(t.is_empty());
    }

    #[test]
    fn replacing_restarts_timer() {
        let mut t = Toasts::new(2);
        t.push(err(NotificationKey::AuthError, "a"));
        t.on_tick();
        t.push(err(NotificationKey::AuthError, "b"));
        t.on_tick();
        assert_eq!(messages(&t), vec!["b"]);
    }

    #[test]
    fn dismiss() {
        let mut t = Toasts::new(10);
        t.push(err(NotificationKey::AuthError, "a"));
        t.push(err(NotificationKey::LoadError, "b"));
        t.dismiss_latest();
        assert_eq!(messages(&t), vec!["a"]);
        t.push(err(NotificationKey::LoadError, "b"));
        t.dismiss_all();
        assert_eq!(t.len(), 0);
    }

    #[test]
    fn drawn_in_bottom_right() {
        let mut t = Toasts::new(10);
        t.push(
            Notification::success(NotificationKey::CreatePlaylistSuccess, "Done", "Imported x")
                .with_link("/playlist/1"),
        );
        let terminal = render(&mut t);
        let buf = terminal.backend().buffer();
        let row = |y: u16| -> String { (0..80).map(|x| buf[(x, y)].symbol()).collect() };
        // 4 rows high: borders, message, link
        assert!(row(16).contains("Done"));
        assert!(row(17).contains("Imported x"));
        assert!(row(18).contains("/playlist/1"));
        assert!(!row(17)[..(80 - WIDTH as usize)].contains("Imported"));
        assert_eq!(buf[(79, 19)].fg, Color::Green);
    }

    #[test]
    fn long_link_is_shown_in_full() {
        let link = "https://listenbrainz.org/playlist/4a5b6c7d-1111-2222-3333-444455556666";
        let mut t = Toasts::new(10);
        t.push(
            Notification::success(
                NotificationKey::CreatePlaylistSuccess,
                "Successfully imported playlist from Spotify",
                "Imported Road Trip",
            )
            .with_link(link),
        );
        let terminal = render(&mut t);
        let buf = terminal.backend().buffer();
        let screen: String = (0..20)
            .map(|y| (0..80).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        assert!(screen.contains("4a5b6c7d-111"));
        assert!(screen.contains("3333-444455556666"), "tail of link missing:\n{screen}");
        // Bottom border is still on the last row
        assert_eq!(buf[(79, 19)].symbol(), "┘");
    }

    #[test]
    fn message_taller_than_screen_is_skipped() {
        let mut t = Toasts::new(10);
        t.push(err(NotificationKey::LoadError, &"x".repeat(100_000)));
        assert!(t.toasts[0].height() > 2000);
        // Too tall for the screen, so nothing is drawn
        let terminal = render(&mut t);
        assert_eq!(terminal.backend().buffer()[(79, 19)].symbol(), " ");
    }
}
