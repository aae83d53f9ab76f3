use std::time::Duration;

use tracing::{info, warn};

use super::pipeline::{Summarizer, pause};
use crate::ai::lead_three_summary;
use crate::core::models::{Article, SummarizedArticle};
use crate::crawler::CONTENT_UNAVAILABLE;

pub const CONTENT_MISSING_SUMMARY: &str = "抱歉，無法獲取文章內容進行摘要。";
pub const SUMMARY_FAILED_MESSAGE: &str = "抱歉，摘要生成失敗，請稍後再試。";

/// Summarizes each article in order. A failed article gets the extractive
/// summary (or a canned notice) instead of failing the batch.
pub async fn summarize_articles(
    summarizer: &dyn Summarizer,
    articles: &[Article],
    delay: Duration,
) -> Vec<SummarizedArticle> {
    let mut out = Vec::with_capacity(articles.len());

    for (i, article) in articles.iter().enumerate() {
        let content = article.content.trim();
        if content.is_empty() || content == CONTENT_UNAVAILABLE {
            warn!(url = %article.url, "Article has no content, skipping summary");
            out.push(SummarizedArticle {
                article: article.clone(),
                summary: CONTENT_MISSING_SUMMARY.to_string(),
            });
            continue;
        }

        info!(
            "Summarizing article {}/{}: {}",
            i + 1,
            articles.len(),
            article.title
        );
        let summary = match summarizer.summarize(&article.title, content).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(url = %article.url, "Summary failed, using extractive fallback: {}", e);
                let fallback = lead_three_summary(content);
                if fallback.is_empty() {
                    SUMMARY_FAILED_MESSAGE.to_string()
                } else {
                    fallback
                }
            }
        };

        out.push(SummarizedArticle {
            article: article.clone(),
            summary,
        });

        if i + 1 < articles.len() {
            pause(delay).await;
        }
    }

    out
}
