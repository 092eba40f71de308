//! # USSD Interpreter
//!
//! Turns a dialed code into a navigation intent. The menu tree depth equals
//! the code's path depth, so `*123*2*1#` jumps straight to feedback without
//! walking the earlier screens:
//!
//! ```text
//! #            → ResetToWelcome
//! *123#        → GoToLanguageSelect
//! *123*L#      → SelectLanguage(L-1)            (→ SymptomSelect)
//! *123*L*S#    → SelectSymptom(L-1, S-1)        (→ Feedback)
//! ```
//!
//! The interpreter is pure: it never touches navigator state.

use std::fmt;

/// Menu root used when no `[ussd] root_code` is configured.
pub const DEFAULT_ROOT_CODE: &str = "123";

const TERMINATOR: char = '#';
const SEPARATOR: char = '*';

/// What the interpreter needs to know about the current menus.
#[derive(Debug, Clone, Copy)]
pub struct MenuContext<'a> {
    pub root_code: &'a str,
    pub language_count: usize,
    pub symptom_count: usize,
}

/// A parsed code, ready for the navigator. Indices are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationIntent {
    ResetToWelcome,
    GoToLanguageSelect,
    SelectLanguage { language: usize },
    SelectSymptom { language: usize, symptom: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    InvalidFormat,
    InvalidLanguageSelection,
    InvalidSymptomSelection,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidFormat => write!(f, "invalid USSD code"),
            ParseError::InvalidLanguageSelection => write!(f, "invalid language selection"),
            ParseError::InvalidSymptomSelection => write!(f, "invalid symptom selection"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Interprets a submitted code against the current menus.
///
/// Checks run in order: bare `#`, root segment, language index, then symptom
/// index, so `*123*9*1#` reports the language even when the symptom is valid.
pub fn interpret(code: &str, ctx: &MenuContext<'_>) -> Result<NavigationIntent, ParseError> {
    // A bare terminator always resets, whatever else is going on
    if code.len() == 1 && code.starts_with(TERMINATOR) {
        return Ok(NavigationIntent::ResetToWelcome);
    }

    let segments = tokenize(code);
    if segments.first() != Some(&ctx.root_code) {
        return Err(ParseError::InvalidFormat);
    }

    match segments.as_slice() {
        [_] => Ok(NavigationIntent::GoToLanguageSelect),
        [_, language] => {
            let language = menu_index(language, ctx.language_count)
                .ok_or(ParseError::InvalidLanguageSelection)?;
            Ok(NavigationIntent::SelectLanguage { language })
        }
        [_, language, symptom] => {
            let language = menu_index(language, ctx.language_count)
                .ok_or(ParseError::InvalidLanguageSelection)?;
            let symptom = menu_index(symptom, ctx.symptom_count)
                .ok_or(ParseError::InvalidSymptomSelection)?;
            Ok(NavigationIntent::SelectSymptom { language, symptom })
        }
        _ => Err(ParseError::InvalidFormat),
    }
}

/// Strips one trailing terminator and splits on the separator, dropping
/// empty segments from leading, trailing or doubled separators.
fn tokenize(code: &str) -> Vec<&str> {
    code.strip_suffix(TERMINATOR)
        .unwrap_or(code)
        .split(SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Converts a 1-based menu choice into a 0-based index within `len`.
fn menu_index(segment: &str, len: usize) -> Option<usize> {
    if !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let choice: usize = segment.parse().ok()?;
    let index = choice.checked_sub(1)?;
    (index < len).then_some(index)
}
