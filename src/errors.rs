use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Failed to parse webhook payload: {0}")]
    ParseError(String),

    #[error("Invalid webhook signature")]
    SignatureError,

    #[error("Failed to access LINE API: {0}")]
    LineApiError(String),

    #[error("Failed to generate summary: {0}")]
    SummaryError(String),

    #[error("Summary model quota exhausted: {0}")]
    QuotaExceeded(String),

    #[error("Failed to crawl articles: {0}")]
    CrawlError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    GeneralError(String),
}

impl BotError {
    /// Transport failures and upstream 5xx responses are worth another attempt.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, BotError::HttpError(_))
    }
}

impl From<reqwest::Error> for BotError {
    fn from(error: reqwest::Error) -> Self {
        BotError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for BotError {
    fn from(error: serde_json::Error) -> Self {
        BotError::ParseError(error.to_string())
    }
}

impl From<rss::Error> for BotError {
    fn from(error: rss::Error) -> Self {
        BotError::CrawlError(format!("RSS parse error: {error}"))
    }
}

impl From<url::ParseError> for BotError {
    fn from(error: url::ParseError) -> Self {
        BotError::CrawlError(format!("Invalid URL: {error}"))
    }
}

impl From<anyhow::Error> for BotError {
    fn from(error: anyhow::Error) -> Self {
        BotError::GeneralError(error.to_string())
    }
}
