//! Gemini API client module
//!
//! Sends summary prompts to the Gemini `generateContent` endpoint. Models are
//! tried in priority order; a model that reports a quota or rate-limit error
//! is marked exhausted and the next one takes over. Other failures are
//! retried on the same model with a linear backoff.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};

use super::prompt_builder::build_summary_prompt;
use crate::errors::BotError;
use crate::worker::pipeline::Summarizer;

const MAX_ATTEMPTS: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Snapshot of model availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelStatus {
    pub current_model: Option<String>,
    pub failed_models: Vec<String>,
    pub available_models: Vec<String>,
}

fn is_quota_message(body: &str) -> bool {
    let lowered = body.to_lowercase();
    ["quota", "resource_exhausted", "429", "limit"]
        .iter()
        .any(|marker| lowered.contains(marker))
}

fn extract_text(response: GenerateContentResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| {
            c.parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

pub struct GeminiClient {
    http: Client,
    api_base: String,
    api_key: String,
    models: Vec<String>,
    failed_models: Mutex<HashSet<String>>,
    retry_delay: Duration,
}

impl GeminiClient {
    #[must_use]
    pub fn new(api_base: &str, api_key: String, models: Vec<String>) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
            models,
            failed_models: Mutex::new(HashSet::new()),
            retry_delay: Duration::from_secs(2),
        }
    }

    /// Base delay between retries on the same model; attempt `k` waits `k * delay`.
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    fn failed(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        self.failed_models
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Highest-priority model that has not been marked exhausted.
    #[must_use]
    pub fn current_model(&self) -> Option<String> {
        let failed = self.failed();
        self.models.iter().find(|m| !failed.contains(*m)).cloned()
    }

    #[must_use]
    pub fn model_status(&self) -> ModelStatus {
        let failed = self.failed();
        ModelStatus {
            current_model: self.models.iter().find(|m| !failed.contains(*m)).cloned(),
            failed_models: self
                .models
                .iter()
                .filter(|m| failed.contains(*m))
                .cloned()
                .collect(),
            available_models: self
                .models
                .iter()
                .filter(|m| !failed.contains(*m))
                .cloned()
                .collect(),
        }
    }

    /// Forget exhausted models, e.g. after the daily quota window resets.
    pub fn reset_failed_models(&self) {
        info!("Resetting exhausted model list");
        self.failed().clear();
    }

    fn mark_failed(&self, model: &str) {
        self.failed().insert(model.to_string());
    }

    /// # Errors
    ///
    /// Returns `QuotaExceeded` once every model is exhausted, or the last
    /// error after the retry budget is spent.
    pub async fn generate_content(&self, prompt: &str) -> Result<String, BotError> {
        let mut attempt = 0;

        loop {
            let Some(model) = self.current_model() else {
                error!("All Gemini models are exhausted");
                return Err(BotError::QuotaExceeded(
                    "no Gemini model has quota left".to_string(),
                ));
            };

            info!(model = %model, attempt = attempt + 1, "Generating content");

            let err = match self.call_model(&model, prompt).await {
                Ok(text) if !text.trim().is_empty() => return Ok(text.trim().to_string()),
                Ok(_) => BotError::SummaryError(format!("{model} returned an empty response")),
                Err(BotError::QuotaExceeded(msg)) => {
                    warn!(model = %model, "Quota exhausted, switching model: {}", msg);
                    self.mark_failed(&model);
                    continue;
                }
                Err(e) => e,
            };

            attempt += 1;
            if attempt >= MAX_ATTEMPTS {
                error!("Giving up after {} attempts: {}", attempt, err);
                return Err(err);
            }

            let wait = self.retry_delay * attempt;
            warn!(
                model = %model,
                "Generation failed ({}), retrying in {}ms",
                err,
                wait.as_millis()
            );
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }
        }
    }

    async fn call_model(&self, model: &str, prompt: &str) -> Result<String, BotError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.api_base, model);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body_text = resp
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            if status == StatusCode::TOO_MANY_REQUESTS || is_quota_message(&body_text) {
                return Err(BotError::QuotaExceeded(format!("{model}: {status}")));
            }
            if status.is_server_error() {
                return Err(BotError::HttpError(format!("{model}: {status} {body_text}")));
            }
            return Err(BotError::SummaryError(format!("{model}: {status} {body_text}")));
        }

        let parsed: GenerateContentResponse = resp.json().await?;
        Ok(extract_text(parsed))
    }

    /// # Errors
    ///
    /// See [`GeminiClient::generate_content`].
    pub async fn summarize_article(&self, title: &str, content: &str) -> Result<String, BotError> {
        let prompt = build_summary_prompt(title, content);

        #[cfg(feature = "debug-logs")]
        info!("Using Gemini prompt:\n{}", prompt);

        let summary = self.generate_content(&prompt).await?;
        info!(chars = summary.chars().count(), "Summary generated");
        Ok(summary)
    }
}

#[async_trait]
impl Summarizer for GeminiClient {
    async fn summarize(&self, title: &str, content: &str) -> Result<String, BotError> {
        self.summarize_article(title, content).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_text_joins_parts_of_first_candidate() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "第一段" }, { "text": "第二段" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(extract_text(resp), "第一段第二段");
    }

    #[test]
    fn extract_text_handles_missing_candidates() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(extract_text(resp), "");
    }

    #[test]
    fn quota_messages_are_detected() {
        assert!(is_quota_message("{\"status\": \"RESOURCE_EXHAUSTED\"}"));
        assert!(is_quota_message("You exceeded your current quota"));
        assert!(!is_quota_message("invalid argument"));
    }

    #[test]
    fn model_status_tracks_failures() {
        let client = GeminiClient::new(
            "http://localhost",
            "key".to_string(),
            vec!["a".to_string(), "b".to_string()],
        );
        assert_eq!(client.current_model().as_deref(), Some("a"));

        client.mark_failed("a");
        let status = client.model_status();
        assert_eq!(status.current_model.as_deref(), Some("b"));
        assert_eq!(status.failed_models, vec!["a".to_string()]);
        assert_eq!(status.available_models, vec!["b".to_string()]);

        client.reset_failed_models();
        assert_eq!(client.current_model().as_deref(), Some("a"));
    }
}
