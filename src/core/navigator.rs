//! # Menu Navigator
//!
//! The menu state machine.
//!
//! ```text
//!  Welcome ──▶ LanguageSelect ──▶ SymptomSelect ──▶ Feedback
//!     ▲                                ▲                │
//!     │                                └──── back ──────┘
//!     └──────────── reset (from any screen) ────────────
//! ```
//!
//! Quick dial can land on any screen directly. Transitions never touch
//! unrelated fields: picking a language keeps the selected symptom.

use std::fmt;

use crate::advice::Catalog;

pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Welcome,
    LanguageSelect,
    SymptomSelect,
    Feedback,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Welcome => "Welcome",
            Screen::LanguageSelect => "Select Language",
            Screen::SymptomSelect => "Select Symptom",
            Screen::Feedback => "Health Advice",
        }
    }
}

/// Rejected transitions. State is unchanged when one of these comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavError {
    LanguageOutOfRange,
    SymptomOutOfRange,
    NoSymptomSelected,
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::LanguageOutOfRange => write!(f, "no such language"),
            NavError::SymptomOutOfRange => write!(f, "no such symptom"),
            NavError::NoSymptomSelected => write!(f, "select a symptom first"),
        }
    }
}

impl std::error::Error for NavError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    screen: Screen,
    language: String,
    symptom: Option<String>,
    default_language: String,
}

impl Navigator {
    pub fn new(default_language: &str) -> Self {
        Self {
            screen: Screen::Welcome,
            language: default_language.to_string(),
            symptom: None,
            default_language: default_language.to_string(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn symptom(&self) -> Option<&str> {
        self.symptom.as_deref()
    }

    /// The (symptom, language) pair to show advice for. `None` unless on
    /// the feedback screen with a symptom selected.
    pub fn advice_key(&self) -> Option<(&str, &str)> {
        match (&self.screen, &self.symptom) {
            (Screen::Feedback, Some(symptom)) => Some((symptom.as_str(), self.language.as_str())),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.screen = Screen::Welcome;
        self.symptom = None;
        self.language = self.default_language.clone();
    }

    pub fn go_to_language_select(&mut self) {
        self.screen = Screen::LanguageSelect;
    }

    /// Picks a language by 0-based menu index and moves to symptom selection.
    pub fn select_language(&mut self, index: usize, catalog: &Catalog) -> Result<(), NavError> {
        let language = catalog
            .languages
            .get(index)
            .ok_or(NavError::LanguageOutOfRange)?;
        self.language = language.code.clone();
        self.screen = Screen::SymptomSelect;
        Ok(())
    }

    /// Picks a symptom by 0-based menu index and enters feedback.
    pub fn select_symptom(&mut self, index: usize, catalog: &Catalog) -> Result<(), NavError> {
        let symptom = catalog
            .symptoms
            .get(index)
            .ok_or(NavError::SymptomOutOfRange)?;
        self.symptom = Some(symptom.id.clone());
        self.enter_feedback()
    }

    /// Picks both at once, as a three-segment quick dial does. Validates
    /// both indices before changing anything.
    pub fn select_language_and_symptom(
        &mut self,
        language: usize,
        symptom: usize,
        catalog: &Catalog,
    ) -> Result<(), NavError> {
        if language >= catalog.languages.len() {
            return Err(NavError::LanguageOutOfRange);
        }
        if symptom >= catalog.symptoms.len() {
            return Err(NavError::SymptomOutOfRange);
        }
        self.select_language(language, catalog)?;
        self.select_symptom(symptom, catalog)
    }

    pub fn enter_feedback(&mut self) -> Result<(), NavError> {
        if self.symptom.is_none() {
            return Err(NavError::NoSymptomSelected);
        }
        self.screen = Screen::Feedback;
        Ok(())
    }

    /// Feedback → SymptomSelect. Returns false (and does nothing) elsewhere.
    pub fn back(&mut self) -> bool {
        if self.screen == Screen::Feedback {
            self.screen = Screen::SymptomSelect;
            true
        } else {
            false
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}
