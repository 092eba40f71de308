//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Pages
//!
//! - **USSD**: phone display on the left, keypad on the right. Keys go to the
//!   keypad, arrows and Enter (with an empty buffer) drive the menu.
//! - **Voice**: while listening, typed text stands in for the microphone.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (lookup in flight, or listening): draws every ~80ms.
//! - **Idle**: sleeps up to 500ms, only redraws on events or background results.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::advice::{AdviceSource, LocalAdviceSource, RemoteAdviceSource, load_catalog};
use crate::core::action::{Action, AdviceRequest, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::navigator::Screen;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::menu_screen::row_count;
use crate::tui::components::{KeypadEvent, KeypadInput, MenuCursor, MenuEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::voice::{Dictation, KeyboardSpeech, UnsupportedSpeech, VoiceSession};
use crate::{AdviceBackend, Page};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub page: Page,
    pub menu: MenuCursor,
    pub keypad: KeypadInput,
    /// Keyboard end of the speech backend. `None` when voice is disabled.
    pub dictation: Option<Dictation>,
}

impl TuiState {
    pub fn new(page: Page, dictation: Option<Dictation>) -> Self {
        Self {
            page,
            menu: MenuCursor::new(),
            keypad: KeypadInput,
            dictation,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Lets Esc arrive without the escape-sequence delay; ignored where unsupported
        execute!(
            stdout(),
            Hide,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (hidden cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags, Show);
    }
}

/// Build the advice source named by the resolved config.
pub fn build_source(config: &ResolvedConfig) -> Arc<dyn AdviceSource> {
    match config.advice_source {
        AdviceBackend::Local => Arc::new(LocalAdviceSource),
        AdviceBackend::Remote => Arc::new(RemoteAdviceSource::new(
            config.api_base_url.clone(),
            config.timeout,
        )),
    }
}

/// Build the voice session, plus the keyboard handle that feeds it.
pub fn build_voice(config: &ResolvedConfig) -> (VoiceSession, Option<Dictation>) {
    if !config.voice_enabled {
        return (VoiceSession::new(Box::new(UnsupportedSpeech)), None);
    }
    let (speech, dictation) = KeyboardSpeech::new();
    (VoiceSession::new(Box::new(speech)), Some(dictation))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let source = build_source(&config);
    let (voice, dictation) = build_voice(&config);
    let mut app = App::from_config(source, voice, &config);
    let mut tui = TuiState::new(config.start_page, dictation);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let effect = update(&mut app, Action::LoadCatalog);
    handle_effect(&app, effect, &tx);

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        let listening = tui.page == Page::Voice && app.voice.is_listening();
        let animating = app.is_loading || listening;

        if listening {
            update(&mut app, Action::PollSpeech);
        }
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let action = match event {
                TuiEvent::Resize => continue,
                // Ctrl+C always quits regardless of page
                TuiEvent::ForceQuit => Some(Action::Quit),
                _ => match tui.page {
                    Page::Ussd => ussd_action(&app, &mut tui, &event),
                    Page::Voice => voice_action(&mut tui, &event),
                },
            };
            let Some(action) = action else { continue };

            let effect = update(&mut app, action);
            if effect == Effect::Quit {
                break 'main;
            }
            handle_effect(&app, effect, &tx);
        }

        // Handle background task actions (catalog and advice lookups)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if effect == Effect::Quit {
                break 'main;
            }
            handle_effect(&app, effect, &tx);
        }
    }

    ratatui::restore();
    Ok(())
}

fn handle_effect(app: &App, effect: Effect, tx: &mpsc::Sender<Action>) {
    match effect {
        Effect::FetchCatalog => spawn_catalog_load(app.source.clone(), tx.clone()),
        Effect::FetchAdvice(request) => spawn_advice_lookup(app.source.clone(), request, tx.clone()),
        Effect::None | Effect::Quit => {}
    }
}

/// Key handling on the USSD page.
fn ussd_action(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    let screen = app.navigator.screen();
    tui.menu.sync(screen, row_count(app, screen));

    match event {
        TuiEvent::Quit => Some(Action::Quit),
        TuiEvent::SwitchPage => {
            tui.page = Page::Voice;
            None
        }
        TuiEvent::InputChar('b') => Some(Action::Back),
        TuiEvent::InputChar('r') => Some(Action::StartOver),
        TuiEvent::CursorUp | TuiEvent::CursorDown => {
            tui.menu.handle_event(event);
            None
        }
        // Enter with nothing typed picks the highlighted menu row
        TuiEvent::Submit if app.buffer.is_empty() => {
            let MenuEvent::Activate(row) = tui.menu.handle_event(event)?;
            match screen {
                Screen::Welcome => Some(Action::Dial(app.root_dial_code())),
                Screen::LanguageSelect => Some(Action::SelectLanguage(row)),
                Screen::SymptomSelect => Some(Action::SelectSymptom(row)),
                Screen::Feedback => None,
            }
        }
        _ => match tui.keypad.handle_event(event)? {
            KeypadEvent::Key(c) => Some(Action::KeyPress(c)),
            KeypadEvent::Delete => Some(Action::DeleteKey),
            KeypadEvent::Clear => Some(Action::ClearBuffer),
            KeypadEvent::Send => Some(Action::Send),
        },
    }
}

/// Key handling on the voice page.
fn voice_action(tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Quit | TuiEvent::SwitchPage => {
            if let Some(dictation) = tui.dictation.as_mut() {
                dictation.discard();
            }
            tui.page = Page::Ussd;
            Some(Action::LeaveVoicePage)
        }
        TuiEvent::ToggleListening => {
            if let Some(dictation) = tui.dictation.as_mut() {
                dictation.discard();
            }
            Some(Action::ToggleListening)
        }
        TuiEvent::InputChar(c) => {
            tui.dictation.as_mut()?.push_char(*c);
            Some(Action::PollSpeech)
        }
        TuiEvent::Backspace => {
            tui.dictation.as_mut()?.backspace();
            Some(Action::PollSpeech)
        }
        TuiEvent::Submit => {
            if let Some(dictation) = tui.dictation.as_mut() {
                dictation.commit();
            }
            Some(Action::ProcessVoiceCommand)
        }
        _ => None,
    }
}

fn spawn_catalog_load(source: Arc<dyn AdviceSource>, tx: mpsc::Sender<Action>) {
    info!("Spawning catalog load from {} source", source.name());
    tokio::spawn(async move {
        let catalog = load_catalog(source.as_ref()).await;
        if tx.send(Action::CatalogLoaded(catalog)).is_err() {
            warn!("Failed to send catalog: receiver dropped");
        }
    });
}

fn spawn_advice_lookup(
    source: Arc<dyn AdviceSource>,
    request: AdviceRequest,
    tx: mpsc::Sender<Action>,
) {
    info!(
        "Spawning advice lookup {} ({}/{})",
        request.request_id, request.symptom, request.language
    );
    tokio::spawn(async move {
        let text = source.advice(&request.symptom, &request.language).await;
        if tx
            .send(Action::AdviceReady {
                request_id: request.request_id,
                text,
            })
            .is_err()
        {
            warn!(
                "Failed to send advice for request {}: receiver dropped",
                request.request_id
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::LocalAdviceSource;
    use crate::test_support::test_app;
    use std::time::Duration;

    fn resolved(advice_source: AdviceBackend, voice_enabled: bool) -> ResolvedConfig {
        ResolvedConfig {
            advice_source,
            default_language: "en".to_string(),
            start_page: Page::Ussd,
            api_base_url: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_secs(1),
            root_code: "123".to_string(),
            voice_enabled,
        }
    }

    /// Feeds events through the USSD key mapping and the reducer.
    fn press(app: &mut App, tui: &mut TuiState, events: &[TuiEvent]) -> Vec<Effect> {
        let mut effects = Vec::new();
        for event in events {
            if let Some(action) = ussd_action(app, tui, event) {
                effects.push(update(app, action));
            }
        }
        effects
    }

    #[test]
    fn test_build_source_follows_config() {
        assert_eq!(build_source(&resolved(AdviceBackend::Local, true)).name(), "local");
        assert_eq!(build_source(&resolved(AdviceBackend::Remote, true)).name(), "remote");
    }

    #[test]
    fn test_build_voice_disabled() {
        let (session, dictation) = build_voice(&resolved(AdviceBackend::Local, false));
        assert!(!session.is_supported());
        assert!(dictation.is_none());

        let (session, dictation) = build_voice(&resolved(AdviceBackend::Local, true));
        assert!(session.is_supported());
        assert!(dictation.is_some());
    }

    #[test]
    fn test_typed_code_reaches_language_select() {
        let mut app = test_app();
        let mut tui = TuiState::new(Page::Ussd, None);
        let keys: Vec<TuiEvent> = "*123#".chars().map(TuiEvent::InputChar).collect();
        press(&mut app, &mut tui, &keys);
        assert_eq!(app.navigator.screen(), Screen::LanguageSelect);
        assert_eq!(app.last_dialed.as_deref(), Some("*123#"));
    }

    #[test]
    fn test_enter_sends_buffer_before_menu() {
        let mut app = test_app();
        let mut tui = TuiState::new(Page::Ussd, None);
        let mut keys: Vec<TuiEvent> = "*123*2".chars().map(TuiEvent::InputChar).collect();
        keys.push(TuiEvent::Submit);
        press(&mut app, &mut tui, &keys);
        assert_eq!(app.navigator.screen(), Screen::SymptomSelect);
        assert_eq!(app.navigator.language(), "twi");
    }

    #[test]
    fn test_menu_selection_with_arrows() {
        let mut app = test_app();
        let mut tui = TuiState::new(Page::Ussd, None);
        // Welcome quick dial, then the third language, then the second symptom
        let effects = press(
            &mut app,
            &mut tui,
            &[
                TuiEvent::Submit,
                TuiEvent::CursorDown,
                TuiEvent::CursorDown,
                TuiEvent::Submit,
                TuiEvent::CursorDown,
                TuiEvent::Submit,
            ],
        );
        assert_eq!(app.navigator.screen(), Screen::Feedback);
        assert_eq!(app.navigator.language(), "fante");
        assert_eq!(app.navigator.symptom(), Some("fever"));
        assert!(matches!(effects.last(), Some(Effect::FetchAdvice(_))));
    }

    #[test]
    fn test_back_and_start_over_letters() {
        let mut app = test_app();
        let mut tui = TuiState::new(Page::Ussd, None);
        update(&mut app, Action::Dial("*123*1*1#".to_string()));
        update(
            &mut app,
            Action::AdviceReady {
                request_id: 1,
                text: "Rest".to_string(),
            },
        );

        press(&mut app, &mut tui, &[TuiEvent::InputChar('b')]);
        assert_eq!(app.navigator.screen(), Screen::SymptomSelect);
        press(&mut app, &mut tui, &[TuiEvent::InputChar('r')]);
        assert_eq!(app.navigator.screen(), Screen::Welcome);
    }

    #[test]
    fn test_keypad_editing_keys() {
        let mut app = test_app();
        let mut tui = TuiState::new(Page::Ussd, None);
        press(
            &mut app,
            &mut tui,
            &[
                TuiEvent::InputChar('*'),
                TuiEvent::InputChar('1'),
                TuiEvent::InputChar('2'),
                TuiEvent::Backspace,
            ],
        );
        assert_eq!(app.buffer.as_str(), "*1");
        press(&mut app, &mut tui, &[TuiEvent::ClearLine]);
        assert!(app.buffer.is_empty());
    }

    #[test]
    fn test_tab_switches_pages() {
        let app = App::new(
            Arc::new(LocalAdviceSource),
            VoiceSession::new(Box::new(UnsupportedSpeech)),
        );
        let mut tui = TuiState::new(Page::Ussd, None);
        assert_eq!(ussd_action(&app, &mut tui, &TuiEvent::SwitchPage), None);
        assert_eq!(tui.page, Page::Voice);
        assert_eq!(
            voice_action(&mut tui, &TuiEvent::SwitchPage),
            Some(Action::LeaveVoicePage)
        );
        assert_eq!(tui.page, Page::Ussd);
    }

    #[test]
    fn test_voice_dictation_round_trip() {
        let (speech, dictation) = KeyboardSpeech::new();
        let mut app = App::new(
            Arc::new(LocalAdviceSource),
            VoiceSession::new(Box::new(speech)),
        );
        let mut tui = TuiState::new(Page::Voice, Some(dictation));

        let action = voice_action(&mut tui, &TuiEvent::ToggleListening).unwrap();
        update(&mut app, action);
        assert!(app.voice.is_listening());

        for c in "thank you".chars() {
            let action = voice_action(&mut tui, &TuiEvent::InputChar(c)).unwrap();
            update(&mut app, action);
        }
        assert_eq!(app.voice.transcript(), "thank you");

        let action = voice_action(&mut tui, &TuiEvent::Submit).unwrap();
        update(&mut app, action);
        assert!(app.voice.feedback().starts_with("You're welcome"));
    }

    #[test]
    fn test_voice_typing_without_backend_is_ignored() {
        let mut tui = TuiState::new(Page::Voice, None);
        assert_eq!(voice_action(&mut tui, &TuiEvent::InputChar('h')), None);
        assert_eq!(
            voice_action(&mut tui, &TuiEvent::Submit),
            Some(Action::ProcessVoiceCommand)
        );
    }
}
