//! Seams between the request pipeline and the outside world.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono_tz::Tz;
use tracing::info;

use crate::ai::{ExtractiveSummarizer, GeminiClient};
use crate::core::config::AppConfig;
use crate::core::models::Article;
use crate::crawler::Crawler;
use crate::errors::BotError;
use crate::line::LineClient;

/// Where articles come from. Implementations never fail; they return fewer results.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn search(&self, keyword: &str, n: usize) -> Vec<Article>;
    async fn latest(&self, n: usize) -> Vec<Article>;
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, title: &str, content: &str) -> Result<String, BotError>;
}

#[async_trait]
pub trait Messenger: Send + Sync {
    async fn reply(&self, reply_token: &str, messages: &[String]) -> Result<(), BotError>;
    async fn push(&self, to: &str, messages: &[String]) -> Result<(), BotError>;
}

/// Pauses between outbound calls that hit rate-limited services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub between_summaries: Duration,
    pub between_pushes: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            between_summaries: Duration::from_secs(1),
            between_pushes: Duration::from_millis(500),
        }
    }
}

impl Pacing {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            between_summaries: Duration::ZERO,
            between_pushes: Duration::ZERO,
        }
    }
}

pub(crate) async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Everything a background task needs, shared across requests.
#[derive(Clone)]
pub struct Pipeline {
    pub source: Arc<dyn ArticleSource>,
    pub summarizer: Arc<dyn Summarizer>,
    pub messenger: Arc<dyn Messenger>,
    pub pacing: Pacing,
    pub timezone: Tz,
}

impl Pipeline {
    /// Wires the crawler, LINE client and summarizer from configuration. Without
    /// a Gemini key the extractive summarizer is used.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, BotError> {
        let source = Crawler::from_config(config)?;
        let messenger = LineClient::new(
            &config.line_api_base,
            config.line_channel_access_token.clone(),
        );

        let summarizer: Arc<dyn Summarizer> = match &config.gemini_api_key {
            Some(key) => {
                info!(models = ?config.gemini_models, "Using Gemini summarizer");
                Arc::new(GeminiClient::new(
                    &config.gemini_api_base,
                    key.clone(),
                    config.gemini_models.clone(),
                ))
            }
            None => {
                info!("GEMINI_API_KEY not set, using extractive summarizer");
                Arc::new(ExtractiveSummarizer)
            }
        };

        Ok(Self {
            source: Arc::new(source),
            summarizer,
            messenger: Arc::new(messenger),
            pacing: Pacing::default(),
            timezone: config.timezone,
        })
    }
}
