//! # Application State
//!
//! Core session state for the simulator. Domain logic only, no TUI types.
//! Presentation state (highlighted row, current page) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── source: Arc<dyn AdviceSource>   // local table or remote service
//! ├── catalog: Catalog                // language + symptom menus
//! ├── navigator: Navigator            // screen, language, symptom
//! ├── buffer: DialBuffer              // keys typed so far
//! ├── last_dialed: Option<String>     // display only
//! ├── advice: Option<String>          // text for the feedback screen
//! ├── is_loading: bool                // lookup in flight, input disabled
//! ├── catalog_loading: bool           // menus still being fetched
//! ├── pending_lookup: Option<u64>     // request id we're waiting on
//! ├── status_message: String          // status bar text
//! ├── error: Option<String>           // last rejected code
//! └── voice: VoiceSession             // voice page
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::advice::{AdviceSource, Catalog, default_catalog};
use crate::core::config::ResolvedConfig;
use crate::core::dial_buffer::DialBuffer;
use crate::core::navigator::Navigator;
use crate::core::ussd::{DEFAULT_ROOT_CODE, MenuContext};
use crate::voice::VoiceSession;

pub const WELCOME_STATUS: &str = "Welcome to JUVO Health";

pub struct App {
    pub source: Arc<dyn AdviceSource>,
    pub catalog: Catalog,
    pub navigator: Navigator,
    pub buffer: DialBuffer,
    pub root_code: String,
    pub last_dialed: Option<String>,
    pub advice: Option<String>,
    pub is_loading: bool,
    /// Menus are being fetched. Keeps input locked until they arrive.
    pub catalog_loading: bool,
    /// Id of the advice lookup whose answer we still want.
    pub pending_lookup: Option<u64>,
    pub next_request_id: u64,
    pub status_message: String,
    pub error: Option<String>,
    pub voice: VoiceSession,
}

impl App {
    pub fn new(source: Arc<dyn AdviceSource>, voice: VoiceSession) -> Self {
        Self {
            source,
            catalog: default_catalog(),
            navigator: Navigator::default(),
            buffer: DialBuffer::new(),
            root_code: DEFAULT_ROOT_CODE.to_string(),
            last_dialed: None,
            advice: None,
            is_loading: false,
            catalog_loading: false,
            pending_lookup: None,
            next_request_id: 1,
            status_message: String::from(WELCOME_STATUS),
            error: None,
            voice,
        }
    }

    /// Create an App with settings from resolved config.
    pub fn from_config(
        source: Arc<dyn AdviceSource>,
        voice: VoiceSession,
        config: &ResolvedConfig,
    ) -> Self {
        let mut app = Self::new(source, voice);
        app.navigator = Navigator::new(&config.default_language);
        app.root_code = config.root_code.clone();
        app
    }

    pub fn menu_context(&self) -> MenuContext<'_> {
        MenuContext {
            root_code: &self.root_code,
            language_count: self.catalog.languages.len(),
            symptom_count: self.catalog.symptoms.len(),
        }
    }

    /// Quick-dial code that opens the menu, e.g. `*123#`.
    pub fn root_dial_code(&self) -> String {
        format!("*{}#", self.root_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::navigator::Screen;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, WELCOME_STATUS);
        assert_eq!(app.navigator.screen(), Screen::Welcome);
        assert!(app.buffer.is_empty());
        assert!(!app.is_loading);
        assert!(app.last_dialed.is_none());
    }

    #[test]
    fn test_menu_context_tracks_catalog() {
        let mut app = test_app();
        let ctx = app.menu_context();
        assert_eq!(ctx.language_count, 4);
        assert_eq!(ctx.symptom_count, 3);

        app.catalog.symptoms.pop();
        assert_eq!(app.menu_context().symptom_count, 2);
    }

    #[test]
    fn test_root_dial_code() {
        let mut app = test_app();
        assert_eq!(app.root_dial_code(), "*123#");
        app.root_code = "384".to_string();
        assert_eq!(app.root_dial_code(), "*384#");
    }
}
