//! RSS feed parsing.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rss::Channel;

use crate::errors::BotError;
use crate::utils::text::collapse_whitespace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    /// Plain-text description with markup removed.
    pub description: String,
    pub published: Option<DateTime<Utc>>,
}

/// # Errors
///
/// Returns `CrawlError` when the bytes are not a readable RSS document.
pub fn parse_feed(content: &[u8]) -> Result<Vec<FeedEntry>, BotError> {
    let channel = Channel::read_from(content)?;

    Ok(channel
        .items()
        .iter()
        .map(|item| FeedEntry {
            title: item.title().unwrap_or("").trim().to_string(),
            link: item.link().unwrap_or("").trim().to_string(),
            description: item.description().map(clean_html).unwrap_or_default(),
            published: item
                .pub_date()
                .and_then(|d| DateTime::parse_from_rfc2822(d.trim()).ok())
                .map(|d| d.with_timezone(&Utc)),
        })
        .collect())
}

/// Strips markup from a feed description.
#[must_use]
pub fn clean_html(html: &str) -> String {
    static TAG_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"<[^>]+>").expect("static regex compile"));

    match html2text::from_read(html.as_bytes(), 1000) {
        Ok(text) => collapse_whitespace(&text),
        Err(_) => collapse_whitespace(&TAG_RE.replace_all(html, " ")),
    }
}
