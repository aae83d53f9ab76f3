//! LINE Messaging API client module
//!
//! Reply and push calls with retry on transport errors and 5xx responses.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{info, warn};
use uuid::Uuid;

use super::response_builder::{create_push_payload, create_reply_payload};
use crate::errors::BotError;
use crate::worker::pipeline::Messenger;

/// LINE accepts at most five message objects per request.
pub const MAX_MESSAGES_PER_REQUEST: usize = 5;

const REPLY_PATH: &str = "/v2/bot/message/reply";
const PUSH_PATH: &str = "/v2/bot/message/push";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct LineClient {
    http: Client,
    api_base: String,
    access_token: String,
}

impl LineClient {
    #[must_use]
    pub fn new(api_base: &str, access_token: String) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            access_token,
        }
    }

    async fn with_retry<F, Fut, T>(&self, operation: F) -> Result<T, BotError>
    where
        F: FnMut() -> Fut + Send,
        Fut: std::future::Future<Output = Result<T, BotError>> + Send,
        T: Send,
    {
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(100)
            .max_delay(Duration::from_secs(2))
            .map(jitter)
            .take(3);

        RetryIf::spawn(strategy, operation, BotError::is_retryable).await
    }

    async fn post(&self, path: &str, payload: &Value, retry_key: Option<&str>) -> Result<(), BotError> {
        let url = format!("{}{}", self.api_base, path);
        let mut request = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(payload);
        if let Some(key) = retry_key {
            request = request.header("X-Line-Retry-Key", key);
        }

        let resp = request.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let body_text = resp
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read body>".to_string());
        if status.is_server_error() {
            warn!("LINE API {} returned {}", path, status);
            return Err(BotError::HttpError(format!("{path}: {status} {body_text}")));
        }
        Err(BotError::LineApiError(format!("{path}: {status} {body_text}")))
    }

    /// Replies using the webhook's one-shot reply token. Extra messages beyond
    /// the per-request limit are dropped.
    ///
    /// # Errors
    ///
    /// Returns `LineApiError` on a 4xx response or the last transport error.
    pub async fn reply_message(&self, reply_token: &str, messages: &[String]) -> Result<(), BotError> {
        if messages.is_empty() {
            return Ok(());
        }
        if messages.len() > MAX_MESSAGES_PER_REQUEST {
            warn!(
                "Reply has {} messages, sending the first {}",
                messages.len(),
                MAX_MESSAGES_PER_REQUEST
            );
        }
        let batch = &messages[..messages.len().min(MAX_MESSAGES_PER_REQUEST)];
        let payload = create_reply_payload(reply_token, batch);

        self.with_retry(|| self.post(REPLY_PATH, &payload, None)).await
    }

    /// Pushes messages to a user, group or room in batches of five. A retry key
    /// per batch lets LINE drop duplicates when a retried request already landed.
    ///
    /// # Errors
    ///
    /// Returns the first batch failure; later batches are not sent.
    pub async fn push_message(&self, to: &str, messages: &[String]) -> Result<(), BotError> {
        for batch in messages.chunks(MAX_MESSAGES_PER_REQUEST) {
            let payload = create_push_payload(to, batch);
            let retry_key = Uuid::new_v4().to_string();
            self.with_retry(|| self.post(PUSH_PATH, &payload, Some(&retry_key)))
                .await?;
        }
        info!(to, count = messages.len(), "Pushed messages");
        Ok(())
    }
}

#[async_trait]
impl Messenger for LineClient {
    async fn reply(&self, reply_token: &str, messages: &[String]) -> Result<(), BotError> {
        self.reply_message(reply_token, messages).await
    }

    async fn push(&self, to: &str, messages: &[String]) -> Result<(), BotError> {
        self.push_message(to, messages).await
    }
}
