//! # TitleBar Component
//!
//! Single-line status bar above the transcript.
//!
//! Stateless: every field is a prop handed in by `draw_ui`. The text degrades
//! in priority order so the bot name and server stay visible on narrow
//! terminals:
//!
//! 1. **Unseen content**: `"Bot (server: http://127.0.0.1:5000) | Waiting for reply | ↓ New"`
//! 2. **Status message**: `"Bot (server: http://127.0.0.1:5000) | Waiting for reply"`
//! 3. **Default**: `"Bot (server: http://127.0.0.1:5000)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub struct TitleBar<'a> {
    pub bot_name: &'a str,
    pub server_url: &'a str,
    /// Transient status, empty when idle
    pub status_message: &'a str,
    /// Whether there's content below the current scroll position
    pub has_unseen_content: bool,
}

impl<'a> TitleBar<'a> {
    pub fn new(
        bot_name: &'a str,
        server_url: &'a str,
        status_message: &'a str,
        has_unseen_content: bool,
    ) -> Self {
        Self {
            bot_name,
            server_url,
            status_message,
            has_unseen_content,
        }
    }

    fn text(&self) -> String {
        let mut parts = vec![format!("{} (server: {})", self.bot_name, self.server_url)];
        if !self.status_message.is_empty() {
            parts.push(self.status_message.to_string());
        }
        if self.has_unseen_content {
            parts.push("↓ New".to_string());
        }
        parts.join(" | ")
    }
}

impl<'a> Component for TitleBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.text()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    const URL: &str = "http://127.0.0.1:5000";

    fn rendered(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(100, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_title_bar_with_unseen_content() {
        let mut title_bar = TitleBar::new("Bot", URL, "Waiting for reply", true);
        let text = rendered(&mut title_bar);

        assert!(text.contains("Bot (server: http://127.0.0.1:5000)"));
        assert!(text.contains("Waiting for reply"));
        assert!(text.contains("↓ New"));
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new("Helper", URL, "Waiting for 2 replies", false);
        let text = rendered(&mut title_bar);

        assert!(text.contains("Helper"));
        assert!(text.contains("Waiting for 2 replies"));
        assert!(!text.contains("↓ New"));
    }

    #[test]
    fn test_title_bar_idle() {
        let mut title_bar = TitleBar::new("Bot", URL, "", false);
        let text = rendered(&mut title_bar);

        assert!(text.contains("Bot (server:"));
        assert!(!text.contains('|'));
    }

    #[test]
    fn test_unseen_without_status_has_single_separator() {
        let title_bar = TitleBar::new("Bot", URL, "", true);
        assert_eq!(title_bar.text(), format!("Bot (server: {URL}) | ↓ New"));
    }
}
