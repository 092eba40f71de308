//! # TitleBar Component
//!
//! Single-line status bar: app name, advice source, status text, and a
//! spinner while a lookup is in flight.
//!
//! Purely presentational. All three props come from core `App` state.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub struct TitleBar {
    pub source_name: String,
    pub status_message: String,
    /// Spinner frame while loading, `None` when idle.
    pub spinner_frame: Option<usize>,
}

impl TitleBar {
    pub fn new(source_name: String, status_message: String, spinner_frame: Option<usize>) -> Self {
        Self {
            source_name,
            status_message,
            spinner_frame,
        }
    }

    fn text(&self) -> String {
        let base = format!("JUVO Health (advice: {})", self.source_name);
        match (self.status_message.is_empty(), self.spinner_frame) {
            (true, None) => base,
            (false, None) => format!("{} | {}", base, self.status_message),
            (_, Some(frame)) => format!(
                "{} | {} {}",
                base,
                SPINNER[frame % SPINNER.len()],
                self.status_message
            ),
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = if self.spinner_frame.is_some() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Cyan)
        };
        frame.render_widget(Line::from(Span::styled(self.text(), style)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_status() {
        let mut title_bar = TitleBar::new("local".to_string(), "Select Language".to_string(), None);
        let text = rendered(&mut title_bar);
        assert!(text.contains("JUVO Health"));
        assert!(text.contains("advice: local"));
        assert!(text.contains("| Select Language"));
    }

    #[test]
    fn test_title_bar_without_status() {
        let mut title_bar = TitleBar::new("remote".to_string(), String::new(), None);
        let text = rendered(&mut title_bar);
        assert!(text.contains("advice: remote"));
        assert!(!text.contains('|'));
    }

    #[test]
    fn test_title_bar_spinner_while_loading() {
        let title_bar = TitleBar::new("remote".to_string(), "Loading advice...".to_string(), Some(11));
        assert_eq!(
            title_bar.text(),
            format!("JUVO Health (advice: remote) | {} Loading advice...", SPINNER[1])
        );
    }
}
