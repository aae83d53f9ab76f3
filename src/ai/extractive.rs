//! Lead-3 extractive summarizer, used when the generative service is not
//! configured or fails for an article.

use async_trait::async_trait;

use crate::errors::BotError;
use crate::utils::text::{char_len, collapse_whitespace, take_chars};
use crate::worker::pipeline::Summarizer;

pub const MAX_SUMMARY_CHARS: usize = 280;
const MIN_SENTENCE_CHARS: usize = 5;
const LEAD_SENTENCES: usize = 3;
const FALLBACK_CHARS: usize = 100;

/// First three sentences of `content`, capped at 280 characters.
#[must_use]
pub fn lead_three_summary(content: &str) -> String {
    let content = collapse_whitespace(content);
    if content.is_empty() {
        return String::new();
    }

    let sentences: Vec<&str> = content
        .split(['。', '！', '？'])
        .map(str::trim)
        .filter(|s| char_len(s) >= MIN_SENTENCE_CHARS)
        .take(LEAD_SENTENCES)
        .collect();

    let summary = if sentences.is_empty() {
        if char_len(&content) > FALLBACK_CHARS {
            format!("{}...", take_chars(&content, FALLBACK_CHARS))
        } else {
            content
        }
    } else {
        format!("{}。", sentences.join("。"))
    };

    if char_len(&summary) <= MAX_SUMMARY_CHARS {
        return summary;
    }

    let head = take_chars(&summary, MAX_SUMMARY_CHARS);
    let cut = match head.rsplit_once('。') {
        Some((before, _)) => format!("{before}。"),
        None => format!("{head}。"),
    };
    if char_len(&cut) > MAX_SUMMARY_CHARS {
        format!("{}...", take_chars(&summary, MAX_SUMMARY_CHARS - 3))
    } else {
        cut
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ExtractiveSummarizer;

#[async_trait]
impl Summarizer for ExtractiveSummarizer {
    async fn summarize(&self, _title: &str, content: &str) -> Result<String, BotError> {
        let summary = lead_three_summary(content);
        if summary.is_empty() {
            Err(BotError::SummaryError("No content to summarize".to_string()))
        } else {
            Ok(summary)
        }
    }
}
