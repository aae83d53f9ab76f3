use chrono_tz::Tz;
use tracing::{error, info};

use super::pipeline::{Messenger, Pacing, pause};
use crate::core::models::{ProcessingTask, SummarizedArticle, TaskRequest};
use crate::errors::BotError;
use crate::line::message_formatter::{
    NEWS_UNAVAILABLE_MESSAGE, format_article_message, format_news_digest, format_no_results,
    format_results_header,
};

/// Pushes the results of a task to its target.
///
/// Keyword searches get a header followed by one message per article;
/// individual article failures are logged and skipped. Latest-news requests
/// get a single digest.
///
/// # Errors
///
/// Returns an error if the first (header, digest or no-result) push fails.
pub async fn deliver_results(
    messenger: &dyn Messenger,
    task: &ProcessingTask,
    articles: &[SummarizedArticle],
    pacing: &Pacing,
    tz: Tz,
) -> Result<(), BotError> {
    let to = task.target_id.as_str();

    match &task.request {
        TaskRequest::KeywordSearch { keyword, .. } => {
            if articles.is_empty() {
                info!(correlation_id = %task.correlation_id, "No matching articles");
                return messenger.push(to, &[format_no_results(keyword)]).await;
            }

            messenger
                .push(to, &[format_results_header(articles.len(), keyword)])
                .await?;

            let mut delivered = 0;
            for (i, article) in articles.iter().enumerate() {
                match messenger
                    .push(to, &[format_article_message(article, i + 1)])
                    .await
                {
                    Ok(()) => delivered += 1,
                    Err(e) => error!(
                        correlation_id = %task.correlation_id,
                        "Failed to push article {}: {}",
                        i + 1,
                        e
                    ),
                }

                if i + 1 < articles.len() {
                    pause(pacing.between_pushes).await;
                }
            }
            info!(
                correlation_id = %task.correlation_id,
                delivered,
                total = articles.len(),
                "Delivered search results"
            );
            Ok(())
        }
        TaskRequest::LatestNews { .. } => {
            let text = if articles.is_empty() {
                NEWS_UNAVAILABLE_MESSAGE.to_string()
            } else {
                format_news_digest(articles, tz)
            };
            messenger.push(to, &[text]).await
        }
    }
}
