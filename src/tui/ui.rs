use crate::Page;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{DIAL_PAD_HEIGHT, DialPad, MenuScreen, TitleBar, VoicePanel};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

const KEYPAD_WIDTH: u16 = 30;

const USSD_HELP: &str =
    " 0-9 * # Dial  Enter Send/Select  ↑↓ Move  b Back  r Start Over  Tab Voice  Esc Quit ";
const VOICE_HELP: &str = " Ctrl+L Listen  type to speak  Enter Process  Tab/Esc USSD  Ctrl+C Quit ";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    let mut title_bar = TitleBar::new(
        app.source.name().to_string(),
        app.status_message.clone(),
        app.is_loading.then_some(spinner_frame),
    );
    title_bar.render(frame, title_area);

    let help = match tui.page {
        Page::Ussd => {
            draw_ussd_page(frame, main_area, app, tui);
            USSD_HELP
        }
        Page::Voice => {
            let utterance = tui.dictation.as_ref().map(|d| d.utterance()).unwrap_or("");
            VoicePanel::new(&app.voice, utterance).render(frame, main_area);
            VOICE_HELP
        }
    };
    frame.render_widget(
        Line::from(Span::styled(help, Style::default().fg(Color::DarkGray))),
        help_area,
    );
}

fn draw_ussd_page(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let [menu_area, keypad_column] =
        Layout::horizontal([Constraint::Min(30), Constraint::Length(KEYPAD_WIDTH)]).areas(area);
    let [keypad_area, _] =
        Layout::vertical([Constraint::Length(DIAL_PAD_HEIGHT), Constraint::Min(0)])
            .areas(keypad_column);

    MenuScreen::new(app, &mut tui.menu).render(frame, menu_area);
    DialPad::new(app.buffer.as_str(), app.is_loading).render(frame, keypad_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_ussd_page_layout() {
        let mut app = test_app();
        update(&mut app, Action::KeyPress('*'));
        update(&mut app, Action::KeyPress('1'));
        let text = rendered(&app, &mut TuiState::new(Page::Ussd, None));
        assert!(text.contains("JUVO Health (advice: local)"));
        assert!(text.contains("Welcome to JUVO Health"));
        assert!(text.contains("Keypad"));
        assert!(text.contains("*1"));
        assert!(text.contains("Tab Voice"));
    }

    #[test]
    fn test_voice_page_layout() {
        let app = test_app();
        let text = rendered(&app, &mut TuiState::new(Page::Voice, None));
        assert!(text.contains("Voice Assistant"));
        assert!(text.contains("Ctrl+L Listen"));
        assert!(!text.contains("Keypad"));
    }

    #[test]
    fn test_loading_spinner_in_title() {
        let mut app = test_app();
        update(&mut app, Action::Dial("*123*1*2#".to_string()));
        assert!(app.is_loading);
        let text = rendered(&app, &mut TuiState::new(Page::Ussd, None));
        assert!(text.contains('⠋'));
        assert!(text.contains("Loading advice..."));
    }
}
