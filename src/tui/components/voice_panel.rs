//! # Voice Panel Component
//!
//! The voice page: listening state, what was heard, and the spoken reply.
//! When the speech backend is unsupported only the explanation is shown.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};

use crate::tui::component::Component;
use crate::voice::VoiceSession;

const TRY_SAYING: &str = "Try saying: \"hello\", \"I have a symptom\", \"thank you\"";

pub struct VoicePanel<'a> {
    session: &'a VoiceSession,
    /// Text typed for the current utterance, not yet delivered.
    utterance: &'a str,
}

impl<'a> VoicePanel<'a> {
    pub fn new(session: &'a VoiceSession, utterance: &'a str) -> Self {
        Self { session, utterance }
    }

    fn status_line(&self) -> Line<'static> {
        if !self.session.is_supported() {
            return Line::from(Span::styled(
                "Voice unavailable",
                Style::default().fg(Color::Red),
            ));
        }
        if self.session.is_listening() {
            Line::from(Span::styled(
                "● Listening (Ctrl+L to stop)",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(
                "○ Not listening (Ctrl+L to start)",
                Style::default().fg(Color::DarkGray),
            ))
        }
    }
}

impl Component for VoicePanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" Voice Assistant ")
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if !self.session.is_supported() {
            let message = Paragraph::new(vec![
                self.status_line(),
                Line::default(),
                Line::from(self.session.feedback().to_string()),
            ])
            .wrap(Wrap { trim: true });
            frame.render_widget(message, inner);
            return;
        }

        let [status_area, heard_area, reply_area, hint_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(inner);

        frame.render_widget(Paragraph::new(self.status_line()), status_area);

        let heard = if self.session.is_listening() && !self.utterance.is_empty() {
            self.utterance
        } else {
            self.session.transcript()
        };
        let heard = Paragraph::new(heard.to_string())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title(" You said "));
        frame.render_widget(heard, heard_area);

        let reply = Paragraph::new(self.session.feedback().to_string())
            .style(Style::default().fg(Color::Cyan))
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title(" Response "));
        frame.render_widget(reply, reply_area);

        frame.render_widget(
            Paragraph::new(TRY_SAYING).style(Style::default().fg(Color::DarkGray)),
            hint_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedSpeech;
    use crate::voice::{TranscriptSegment, UnsupportedSpeech};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(session: &VoiceSession, utterance: &str) -> String {
        let backend = TestBackend::new(70, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| VoicePanel::new(session, utterance).render(f, f.area()))
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
    fn test_unsupported_shows_explanation() {
        let session = VoiceSession::new(Box::new(UnsupportedSpeech));
        let text = rendered(&session, "");
        assert!(text.contains("Voice unavailable"));
        assert!(text.contains("not supported"));
        assert!(!text.contains("You said"));
    }

    #[test]
    fn test_idle_panel() {
        let session = VoiceSession::new(Box::new(ScriptedSpeech::new(vec![])));
        let text = rendered(&session, "");
        assert!(text.contains("Not listening"));
        assert!(text.contains("Try saying"));
    }

    #[test]
    fn test_listening_shows_transcript_and_reply() {
        let mut session = VoiceSession::new(Box::new(ScriptedSpeech::new(vec![
            TranscriptSegment {
                text: "hello there".to_string(),
                is_final: true,
            },
        ])));
        session.toggle_listening().unwrap();
        session.poll();
        session.process_command();

        let text = rendered(&session, "");
        assert!(text.contains("Listening"));
        assert!(text.contains("hello there"));
        assert!(text.contains("How can I help"));
    }
}
