//! Compiled-in advice table and the default menus.
//!
//! Used directly by [`LocalAdviceSource`] and as the fallback catalog when
//! the remote service can't be reached.

use async_trait::async_trait;

use super::source::AdviceSource;
use super::types::{Catalog, Language, Symptom};

/// Shown when the table has no entry for a (symptom, language) pair.
pub const NO_ADVICE_AVAILABLE: &str = "Sorry, no advice is available for this symptom in your language yet.";

const LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("twi", "Twi"),
    ("fante", "Fante"),
    ("dagbani", "Dagbani"),
];

const SYMPTOMS: &[(&str, &str)] = &[
    ("headache", "Headache"),
    ("fever", "Fever"),
    ("cough", "Cough"),
];

/// (symptom, language, advice)
const ADVICE: &[(&str, &str, &str)] = &[
    ("headache", "en", "Drink water and rest. Seek care if it worsens."),
    ("headache", "twi", "Nom nsuo na da. Kɔhɔhɔ dɔkita sɛ ɛyɛ den."),
    ("headache", "fante", "Nom nsuo na dɔkita ho hia wo sɛ ɛyɛ duru."),
    ("headache", "dagbani", "Yoli pam ka yaafa. N nya doo kpema ka yɛ zuɣu."),
    ("fever", "en", "Check your temperature. Go to a clinic if high."),
    ("fever", "twi", "Hwɛ wo ho hyɛ. Kɔhɔhɔ dɔkita sɛ ɛyɛ den."),
    ("fever", "fante", "Hwɛ wo ho hyɛ. Kɔ dɔkita hɔ sɛ ɛyɛ duru."),
    ("fever", "dagbani", "Nyɛ yiɣisi. Kɔ dɔkita sɔŋ sɛ ka lee gari."),
    ("cough", "en", "Stay hydrated. See a doctor if it persists."),
    ("cough", "twi", "Nom nsuo. Kɔhɔhɔ dɔkita sɛ ɛyɛ den."),
    ("cough", "fante", "Nom nsuo. Kɔ dɔkita hɔ sɛ ɛyɛ duru."),
    ("cough", "dagbani", "Yoli pam. Kɔ dɔkita sɔŋ sɛ ka lee gari."),
];

pub fn default_languages() -> Vec<Language> {
    LANGUAGES
        .iter()
        .map(|(code, name)| Language::new(code, name))
        .collect()
}

pub fn default_symptoms() -> Vec<Symptom> {
    SYMPTOMS
        .iter()
        .map(|(id, name)| Symptom::new(id, name))
        .collect()
}

pub fn default_catalog() -> Catalog {
    Catalog {
        languages: default_languages(),
        symptoms: default_symptoms(),
    }
}

/// Looks up table advice, if there is an entry for the pair.
pub fn table_advice(symptom: &str, language: &str) -> Option<&'static str> {
    ADVICE
        .iter()
        .find(|(s, l, _)| *s == symptom && *l == language)
        .map(|(_, _, text)| *text)
}

/// Advice source backed by the compiled-in table.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalAdviceSource;

#[async_trait]
impl AdviceSource for LocalAdviceSource {
    fn name(&self) -> &str {
        "local"
    }

    async fn languages(&self) -> Vec<Language> {
        default_languages()
    }

    async fn symptoms(&self, _language: Option<&str>) -> Vec<Symptom> {
        default_symptoms()
    }

    async fn advice(&self, symptom: &str, language: &str) -> String {
        table_advice(symptom, language)
            .unwrap_or(NO_ADVICE_AVAILABLE)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_default_pair_has_advice() {
        for symptom in default_symptoms() {
            for language in default_languages() {
                let text = table_advice(&symptom.id, &language.code);
                assert!(
                    text.is_some_and(|t| !t.is_empty()),
                    "missing {}/{}",
                    symptom.id,
                    language.code
                );
            }
        }
    }

    #[test]
    fn test_default_menu_order() {
        let codes: Vec<String> = default_languages().into_iter().map(|l| l.code).collect();
        assert_eq!(codes, ["en", "twi", "fante", "dagbani"]);
        let ids: Vec<String> = default_symptoms().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, ["headache", "fever", "cough"]);
    }

    #[tokio::test]
    async fn test_local_source_known_pair() {
        let text = LocalAdviceSource.advice("headache", "twi").await;
        assert_eq!(text, "Nom nsuo na da. Kɔhɔhɔ dɔkita sɛ ɛyɛ den.");
    }

    #[tokio::test]
    async fn test_local_source_missing_language_apologises() {
        let text = LocalAdviceSource.advice("headache", "ewe").await;
        assert_eq!(text, NO_ADVICE_AVAILABLE);
        let text = LocalAdviceSource.advice("rash", "en").await;
        assert_eq!(text, NO_ADVICE_AVAILABLE);
    }
}
