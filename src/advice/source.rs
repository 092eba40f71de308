use std::fmt;

use async_trait::async_trait;

use super::types::{Catalog, Language, Symptom};

/// Errors from talking to the advice service.
/// Sources recover from these themselves; they never reach the navigator.
#[derive(Debug)]
pub enum LookupError {
    /// Transport failure (timeout, DNS, connection refused).
    Network(String),
    /// Service answered with a non-success status.
    Api { status: u16, message: String },
    /// Body was not the shape we expect.
    Malformed(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Network(msg) => write!(f, "network error: {msg}"),
            LookupError::Api { status, message } => {
                write!(f, "advice service error (HTTP {status}): {message}")
            }
            LookupError::Malformed(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for LookupError {}

/// Where menus and advice text come from. Chosen once at session start.
///
/// Every method returns displayable data: implementations fall back to
/// default content instead of failing.
#[async_trait]
pub trait AdviceSource: Send + Sync {
    /// Returns the name of the source.
    fn name(&self) -> &str;

    async fn languages(&self) -> Vec<Language>;

    /// Lists symptoms, optionally only those with advice in `language`.
    async fn symptoms(&self, language: Option<&str>) -> Vec<Symptom>;

    /// Advice text for the pair. Never empty.
    async fn advice(&self, symptom: &str, language: &str) -> String;
}

/// Loads both menus from a source.
pub async fn load_catalog(source: &dyn AdviceSource) -> Catalog {
    let languages = source.languages().await;
    let symptoms = source.symptoms(None).await;
    Catalog {
        languages,
        symptoms,
    }
}
