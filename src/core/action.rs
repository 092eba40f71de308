//! # Actions
//!
//! Everything that can happen in the simulator becomes an `Action`.
//! User presses `#`? That's `Action::KeyPress('#')`.
//! Advice arrives? That's `Action::AdviceReady { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any I/O the adapter should
//! start. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info};

use crate::advice::Catalog;
use crate::core::navigator::{NavError, Screen};
use crate::core::state::{App, WELCOME_STATUS};
use crate::core::ussd::{NavigationIntent, ParseError, interpret};

const TERMINATOR: char = '#';

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A keypad key: digit, `*` or `#`. `#` submits the code.
    KeyPress(char),
    /// The Send button. Submits the buffer (plus terminator) if non-empty.
    Send,
    /// Submit a complete code directly (quick-dial).
    Dial(String),
    DeleteKey,
    ClearBuffer,
    /// Tap on the n-th entry (0-based) of the language list.
    SelectLanguage(usize),
    /// Tap on the n-th entry (0-based) of the symptom list.
    SelectSymptom(usize),
    Back,
    StartOver,
    LoadCatalog,
    CatalogLoaded(Catalog),
    AdviceReady { request_id: u64, text: String },
    ToggleListening,
    PollSpeech,
    ProcessVoiceCommand,
    LeaveVoicePage,
    Quit,
}

/// An advice lookup the adapter should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceRequest {
    pub request_id: u64,
    pub symptom: String,
    pub language: String,
}

/// I/O requested by `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    FetchCatalog,
    FetchAdvice(AdviceRequest),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    if app.is_loading && blocked_while_loading(app, &action) {
        debug!("Ignoring {:?} while loading", action);
        return Effect::None;
    }

    match action {
        Action::KeyPress(TERMINATOR) => {
            let mut code = app.buffer.submit();
            code.push(TERMINATOR);
            submit_code(app, code)
        }
        Action::KeyPress(c) => {
            app.buffer.append(c);
            Effect::None
        }
        Action::Send => {
            if app.buffer.is_empty() {
                return Effect::None;
            }
            let mut code = app.buffer.submit();
            code.push(TERMINATOR);
            submit_code(app, code)
        }
        Action::Dial(code) => {
            app.buffer.clear();
            submit_code(app, code)
        }
        Action::DeleteKey => {
            app.buffer.delete();
            Effect::None
        }
        Action::ClearBuffer => {
            app.buffer.clear();
            Effect::None
        }
        Action::SelectLanguage(index) => {
            if app.navigator.screen() != Screen::LanguageSelect {
                return Effect::None;
            }
            app.buffer.clear();
            let result = app.navigator.select_language(index, &app.catalog);
            after_navigation(app, result)
        }
        Action::SelectSymptom(index) => {
            if app.navigator.screen() != Screen::SymptomSelect {
                return Effect::None;
            }
            app.buffer.clear();
            let result = app.navigator.select_symptom(index, &app.catalog);
            after_navigation(app, result)
        }
        Action::Back => {
            app.buffer.clear();
            if app.navigator.back() {
                app.error = None;
                clear_advice(app);
                app.status_message = String::from("Choose a symptom");
            }
            Effect::None
        }
        Action::StartOver => {
            start_over(app);
            Effect::None
        }
        Action::LoadCatalog => {
            app.catalog_loading = true;
            app.is_loading = true;
            app.status_message = format!("Loading menus from {} source...", app.source.name());
            Effect::FetchCatalog
        }
        Action::CatalogLoaded(catalog) => {
            info!(
                "Catalog loaded: {} languages, {} symptoms",
                catalog.languages.len(),
                catalog.symptoms.len()
            );
            app.catalog = catalog;
            app.catalog_loading = false;
            if app.pending_lookup.is_none() {
                app.is_loading = false;
                app.status_message = String::from(WELCOME_STATUS);
            }
            Effect::None
        }
        Action::AdviceReady { request_id, text } => {
            let wanted = app.pending_lookup == Some(request_id)
                && app.navigator.screen() == Screen::Feedback;
            if !wanted {
                debug!("Discarding stale advice for request {}", request_id);
                return Effect::None;
            }
            app.pending_lookup = None;
            app.is_loading = false;
            app.advice = Some(text);
            app.status_message = String::from("Advice ready");
            Effect::None
        }
        Action::ToggleListening => {
            if let Err(e) = app.voice.toggle_listening() {
                app.status_message = format!("Voice: {e}");
            }
            Effect::None
        }
        Action::PollSpeech => {
            app.voice.poll();
            Effect::None
        }
        Action::ProcessVoiceCommand => {
            app.voice.poll();
            app.voice.process_command();
            Effect::None
        }
        Action::LeaveVoicePage => {
            app.voice.stop();
            Effect::None
        }
        Action::Quit => {
            app.voice.stop();
            Effect::Quit
        }
    }
}

/// Menu input is frozen while a lookup is in flight. Start Over, Quit and
/// the voice page still work, and so does a bare `#` on an empty buffer,
/// which resets from any state.
fn blocked_while_loading(app: &App, action: &Action) -> bool {
    if *action == Action::KeyPress(TERMINATOR) && app.buffer.is_empty() {
        return false;
    }
    matches!(
        action,
        Action::KeyPress(_)
            | Action::Send
            | Action::Dial(_)
            | Action::DeleteKey
            | Action::ClearBuffer
            | Action::SelectLanguage(_)
            | Action::SelectSymptom(_)
            | Action::Back
            | Action::LoadCatalog
    )
}

fn submit_code(app: &mut App, code: String) -> Effect {
    info!("Dialed {}", code);
    let result = interpret(&code, &app.menu_context());
    app.last_dialed = Some(code);

    match result {
        Ok(intent) => apply_intent(app, intent),
        Err(e) => {
            info!("Rejected code: {}", e);
            app.error = Some(parse_error_message(e, &app.root_dial_code()));
            app.status_message = String::from("Invalid code");
            Effect::None
        }
    }
}

fn apply_intent(app: &mut App, intent: NavigationIntent) -> Effect {
    debug!("Applying {:?}", intent);
    let result = match intent {
        NavigationIntent::ResetToWelcome => {
            start_over(app);
            return Effect::None;
        }
        NavigationIntent::GoToLanguageSelect => {
            app.navigator.go_to_language_select();
            Ok(())
        }
        NavigationIntent::SelectLanguage { language } => {
            app.navigator.select_language(language, &app.catalog)
        }
        NavigationIntent::SelectSymptom { language, symptom } => {
            app.navigator
                .select_language_and_symptom(language, symptom, &app.catalog)
        }
    };
    after_navigation(app, result)
}

/// Updates status after a transition and starts a lookup on entering feedback.
fn after_navigation(app: &mut App, result: Result<(), NavError>) -> Effect {
    if let Err(e) = result {
        info!("Navigation rejected: {}", e);
        app.error = Some(format!("Sorry, {e}."));
        return Effect::None;
    }

    app.error = None;
    match app.navigator.screen() {
        Screen::Feedback => begin_lookup(app),
        screen => {
            clear_advice(app);
            app.status_message = screen.title().to_string();
            Effect::None
        }
    }
}

fn begin_lookup(app: &mut App) -> Effect {
    let Some((symptom, language)) = app.navigator.advice_key() else {
        return Effect::None;
    };
    let request = AdviceRequest {
        request_id: app.next_request_id,
        symptom: symptom.to_string(),
        language: language.to_string(),
    };
    app.next_request_id += 1;
    app.pending_lookup = Some(request.request_id);
    app.is_loading = true;
    app.advice = None;
    app.status_message = String::from("Loading advice...");
    Effect::FetchAdvice(request)
}

/// Drops the current advice and any lookup for it. A catalog fetch in
/// flight keeps input locked.
fn clear_advice(app: &mut App) {
    app.pending_lookup = None;
    app.is_loading = app.catalog_loading;
    app.advice = None;
}

fn start_over(app: &mut App) {
    app.navigator.reset();
    app.buffer.clear();
    app.error = None;
    clear_advice(app);
    app.status_message = String::from(WELCOME_STATUS);
}

fn parse_error_message(error: ParseError, root: &str) -> String {
    match error {
        ParseError::InvalidFormat => format!("Unknown code. Dial {root} to begin."),
        ParseError::InvalidLanguageSelection => String::from("Invalid language selection."),
        ParseError::InvalidSymptomSelection => String::from("Invalid symptom selection."),
    }
}
