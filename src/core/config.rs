use std::env;

use chrono_tz::Tz;

pub const DEFAULT_GEMINI_MODELS: &[&str] = &[
    "gemini-2.0-flash-lite",
    "gemini-2.5-flash-lite",
    "gemini-2.0-flash",
    "gemini-1.5-flash",
    "gemini-2.5-flash",
    "gemini-1.5-flash-8b",
    "gemini-2.5-pro",
    "gemini-1.5-pro",
];

pub const DEFAULT_LINE_API_BASE: &str = "https://api.line.me";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_NEWS_SITE_BASE: &str = "https://buzzorange.com/techorange";
pub const DEFAULT_ARTICLE_COUNT: usize = 3;
pub const DEFAULT_PORT: u16 = 4040;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub line_channel_secret: String,
    pub line_channel_access_token: String,
    pub gemini_api_key: Option<String>,
    pub gemini_models: Vec<String>,
    pub line_api_base: String,
    pub gemini_api_base: String,
    pub news_site_base: String,
    pub news_feed_url: String,
    pub article_count: usize,
    pub timezone: Tz,
    pub port: u16,
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, String> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| get(key).ok_or_else(|| format!("{key}: environment variable not found"));

        let news_site_base = get("NEWS_SITE_BASE")
            .unwrap_or_else(|| DEFAULT_NEWS_SITE_BASE.to_string())
            .trim_end_matches('/')
            .to_string();
        let news_feed_url =
            get("NEWS_FEED_URL").unwrap_or_else(|| format!("{news_site_base}/feed/"));

        let gemini_models = get("GEMINI_MODELS").map_or_else(
            || DEFAULT_GEMINI_MODELS.iter().map(ToString::to_string).collect(),
            |raw| {
                raw.split(',')
                    .map(|m| m.trim().to_string())
                    .filter(|m| !m.is_empty())
                    .collect::<Vec<_>>()
            },
        );
        if gemini_models.is_empty() {
            return Err("GEMINI_MODELS: no model names given".to_string());
        }

        let article_count = match get("ARTICLE_COUNT") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|e| format!("ARTICLE_COUNT: {e}"))?,
            None => DEFAULT_ARTICLE_COUNT,
        };
        if article_count == 0 {
            return Err("ARTICLE_COUNT: must be at least 1".to_string());
        }

        let timezone = match get("BOT_TIMEZONE") {
            Some(raw) => raw
                .trim()
                .parse::<Tz>()
                .map_err(|e| format!("BOT_TIMEZONE: {e}"))?,
            None => chrono_tz::Asia::Taipei,
        };

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| format!("PORT: {e}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            line_channel_secret: required("LINE_CHANNEL_SECRET")?,
            line_channel_access_token: required("LINE_CHANNEL_ACCESS_TOKEN")?,
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_models,
            line_api_base: get("LINE_API_BASE")
                .unwrap_or_else(|| DEFAULT_LINE_API_BASE.to_string()),
            gemini_api_base: get("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
            news_site_base,
            news_feed_url,
            article_count,
            timezone,
            port,
        })
    }
}
