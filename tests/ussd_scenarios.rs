use std::sync::Arc;
use std::time::Duration;

use juvo::advice::table::table_advice;
use juvo::advice::{ADVICE_UNAVAILABLE, AdviceSource, LocalAdviceSource, RemoteAdviceSource};
use juvo::core::action::{Action, Effect, update};
use juvo::core::navigator::Screen;
use juvo::core::state::App;
use juvo::voice::{UnsupportedSpeech, VoiceSession};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn app_with(source: Arc<dyn AdviceSource>) -> App {
    App::new(source, VoiceSession::new(Box::new(UnsupportedSpeech)))
}

/// Types `code` on the keypad, one key at a time.
fn type_code(app: &mut App, code: &str) -> Effect {
    let mut last = Effect::None;
    for c in code.chars() {
        last = update(app, Action::KeyPress(c));
    }
    last
}

/// Runs the I/O an effect asks for and feeds the result back, like the TUI loop.
async fn settle(app: &mut App, effect: Effect) {
    match effect {
        Effect::FetchAdvice(request) => {
            let text = app
                .source
                .advice(&request.symptom, &request.language)
                .await;
            update(
                app,
                Action::AdviceReady {
                    request_id: request.request_id,
                    text,
                },
            );
        }
        Effect::FetchCatalog => {
            let catalog = juvo::advice::load_catalog(app.source.as_ref()).await;
            update(app, Action::CatalogLoaded(catalog));
        }
        Effect::None | Effect::Quit => {}
    }
}

// ============================================================================
// Walkthrough
// ============================================================================

#[tokio::test]
async fn test_root_code_opens_language_menu() {
    let mut app = app_with(Arc::new(LocalAdviceSource));
    type_code(&mut app, "*123#");
    assert_eq!(app.navigator.screen(), Screen::LanguageSelect);
    assert!(app.buffer.is_empty());
}

#[tokio::test]
async fn test_language_code_selects_twi() {
    let mut app = app_with(Arc::new(LocalAdviceSource));
    type_code(&mut app, "*123*2#");
    assert_eq!(app.navigator.screen(), Screen::SymptomSelect);
    assert_eq!(app.navigator.language(), "twi");
}

#[tokio::test]
async fn test_full_code_shows_table_advice() {
    let mut app = app_with(Arc::new(LocalAdviceSource));
    let effect = type_code(&mut app, "*123*2*1#");
    assert_eq!(app.navigator.screen(), Screen::Feedback);
    assert_eq!(app.navigator.symptom(), Some("headache"));
    assert!(app.is_loading);

    settle(&mut app, effect).await;
    assert!(!app.is_loading);
    assert_eq!(app.advice.as_deref(), table_advice("headache", "twi"));
}

#[tokio::test]
async fn test_out_of_range_language_is_rejected() {
    let mut app = app_with(Arc::new(LocalAdviceSource));
    type_code(&mut app, "*123*9#");
    assert_eq!(app.navigator.screen(), Screen::Welcome);
    assert_eq!(app.error.as_deref(), Some("Invalid language selection."));
    assert!(app.buffer.is_empty());
}

#[tokio::test]
async fn test_bare_terminator_resets_from_feedback() {
    let mut app = app_with(Arc::new(LocalAdviceSource));
    let effect = type_code(&mut app, "*123*1*3#");
    settle(&mut app, effect).await;
    assert_eq!(app.navigator.screen(), Screen::Feedback);

    type_code(&mut app, "#");
    assert_eq!(app.navigator.screen(), Screen::Welcome);
    assert_eq!(app.navigator.symptom(), None);
    assert!(app.advice.is_none());
}

#[tokio::test]
async fn test_remote_network_error_shows_apology() {
    let source = RemoteAdviceSource::new("http://127.0.0.1:9".to_string(), Duration::from_millis(500));
    let mut app = app_with(Arc::new(source));
    let effect = type_code(&mut app, "*123*1*2#");
    assert_eq!(app.navigator.screen(), Screen::Feedback);

    settle(&mut app, effect).await;
    assert_eq!(app.navigator.screen(), Screen::Feedback);
    assert_eq!(app.advice.as_deref(), Some(ADVICE_UNAVAILABLE));
}

#[tokio::test]
async fn test_remote_catalog_drives_menu_indices() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"code": "en", "name": "English"},
            {"code": "ewe", "name": "Ewe"}
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/symptoms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"key": "malaria", "name": "Malaria"}
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/advice"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"advice": "Sleep under a net."})),
        )
        .mount(&mock_server)
        .await;

    let source = RemoteAdviceSource::new(mock_server.uri(), Duration::from_secs(2));
    let mut app = app_with(Arc::new(source));
    let effect = update(&mut app, Action::LoadCatalog);
    settle(&mut app, effect).await;
    assert_eq!(app.catalog.languages.len(), 2);
    assert!(!app.is_loading);

    // Only one symptom is listed now, so index 2 is out of range
    type_code(&mut app, "*123*2*2#");
    assert_eq!(app.error.as_deref(), Some("Invalid symptom selection."));

    let effect = type_code(&mut app, "*123*2*1#");
    assert_eq!(app.navigator.language(), "ewe");
    assert_eq!(app.navigator.symptom(), Some("malaria"));
    settle(&mut app, effect).await;
    assert_eq!(app.advice.as_deref(), Some("Sleep under a net."));
}
