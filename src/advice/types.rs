use serde::{Deserialize, Serialize};

/// A language the menus can be shown in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Language {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
}

impl Language {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}

/// A symptom the user can ask advice for. The advice service names the
/// identifier either `id` or `key`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Symptom {
    #[serde(default, alias = "key")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl Symptom {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

/// Ordered menus the interpreter indexes into.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    pub languages: Vec<Language>,
    pub symptoms: Vec<Symptom>,
}

impl Catalog {
    pub fn language_position(&self, code: &str) -> Option<usize> {
        self.languages.iter().position(|l| l.code == code)
    }

    pub fn language_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.languages
            .iter()
            .find(|l| l.code == code)
            .map(|l| l.name.as_str())
            .unwrap_or(code)
    }

    pub fn symptom_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.symptoms
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.as_str())
            .unwrap_or(id)
    }
}

/// Body of `GET /api/advice`. Older deployments answer with `feedback`.
#[derive(Deserialize, Debug, Default)]
pub struct AdviceResponse {
    #[serde(default)]
    pub advice: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
}

impl AdviceResponse {
    /// Returns the advice text, if the body carried a non-empty one.
    pub fn text(self) -> Option<String> {
        self.advice
            .or(self.feedback)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}
