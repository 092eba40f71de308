//! Advice source backed by the JUVO advice service.
//!
//! Three read-only endpoints:
//! - `GET /api/languages` → `[{code, name}]`
//! - `GET /api/symptoms?lang=xx` → `[{id, name}]` (or `{key, name}`)
//! - `GET /api/advice?symptom=..&lang=..` → `{advice}` (or `{feedback}`)
//!
//! The `fetch_*` methods surface every failure as a [`LookupError`]. The
//! [`AdviceSource`] impl swallows those and falls back to default data, so a
//! dead service still leaves a usable simulator.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::source::{AdviceSource, LookupError};
use super::table::{default_languages, default_symptoms};
use super::types::{AdviceResponse, Language, Symptom};

/// Shown when the advice request fails or comes back without advice.
pub const ADVICE_UNAVAILABLE: &str = "Failed to load health advice. Please try again later.";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct RemoteAdviceSource {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteAdviceSource {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout, using defaults: {}", e);
                reqwest::Client::new()
            });

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETs `path` and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, LookupError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(LookupError::Api { status, message });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| LookupError::Malformed(e.to_string()))
    }

    pub async fn fetch_languages(&self) -> Result<Vec<Language>, LookupError> {
        let languages: Vec<Language> = self.get_json("/api/languages", &[]).await?;
        let languages: Vec<Language> = languages
            .into_iter()
            .filter(|l| !l.code.is_empty())
            .collect();
        if languages.is_empty() {
            return Err(LookupError::Malformed("no languages listed".to_string()));
        }
        Ok(languages)
    }

    pub async fn fetch_symptoms(&self, language: Option<&str>) -> Result<Vec<Symptom>, LookupError> {
        let query: Vec<(&str, &str)> = language.map(|l| ("lang", l)).into_iter().collect();
        let symptoms: Vec<Symptom> = self.get_json("/api/symptoms", &query).await?;
        let symptoms: Vec<Symptom> = symptoms
            .into_iter()
            .filter(|s| !s.id.is_empty())
            .collect();
        if symptoms.is_empty() {
            return Err(LookupError::Malformed("no symptoms listed".to_string()));
        }
        Ok(symptoms)
    }

    pub async fn fetch_advice(&self, symptom: &str, language: &str) -> Result<String, LookupError> {
        let body: AdviceResponse = self
            .get_json("/api/advice", &[("symptom", symptom), ("lang", language)])
            .await?;
        body.text()
            .ok_or_else(|| LookupError::Malformed("missing advice field".to_string()))
    }
}

#[async_trait]
impl AdviceSource for RemoteAdviceSource {
    fn name(&self) -> &str {
        "remote"
    }

    async fn languages(&self) -> Vec<Language> {
        match self.fetch_languages().await {
            Ok(languages) => {
                info!("Loaded {} languages from {}", languages.len(), self.base_url);
                languages
            }
            Err(e) => {
                warn!("Language list unavailable, using defaults: {}", e);
                default_languages()
            }
        }
    }

    async fn symptoms(&self, language: Option<&str>) -> Vec<Symptom> {
        match self.fetch_symptoms(language).await {
            Ok(symptoms) => {
                info!("Loaded {} symptoms from {}", symptoms.len(), self.base_url);
                symptoms
            }
            Err(e) => {
                warn!("Symptom list unavailable, using defaults: {}", e);
                default_symptoms()
            }
        }
    }

    async fn advice(&self, symptom: &str, language: &str) -> String {
        match self.fetch_advice(symptom, language).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Advice lookup failed for {}/{}: {}", symptom, language, e);
                ADVICE_UNAVAILABLE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let source = RemoteAdviceSource::new("http://localhost:8080/".to_string(), DEFAULT_TIMEOUT);
        assert_eq!(source.base_url(), "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_unreachable_service_falls_back() {
        // Port 9 (discard) on localhost is not expected to serve HTTP
        let source = RemoteAdviceSource::new(
            "http://127.0.0.1:9".to_string(),
            Duration::from_millis(500),
        );
        assert_eq!(source.advice("fever", "en").await, ADVICE_UNAVAILABLE);
        assert_eq!(source.languages().await, default_languages());
        assert_eq!(source.symptoms(None).await, default_symptoms());
    }
}
