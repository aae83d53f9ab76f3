use tracing::{error, info};

use super::pipeline::Pipeline;
use super::{deliver, summarize};
use crate::core::models::{ProcessingTask, TaskRequest};
use crate::line::message_formatter::REQUEST_FAILED_MESSAGE;

/// Runs one request end to end: crawl, summarize, deliver. Failures are
/// reported to the user with a canned message; nothing is returned.
#[tracing::instrument(
    level = "info",
    skip(pipeline, task),
    fields(correlation_id = %task.correlation_id, user_id = %task.user_id)
)]
pub async fn process_task(pipeline: &Pipeline, task: &ProcessingTask) {
    info!("Processing task: {:?}", task.request);

    let articles = match &task.request {
        TaskRequest::KeywordSearch { keyword, count } => {
            pipeline.source.search(keyword, *count).await
        }
        TaskRequest::LatestNews { count } => pipeline.source.latest(*count).await,
    };

    let summarized = summarize::summarize_articles(
        pipeline.summarizer.as_ref(),
        &articles,
        pipeline.pacing.between_summaries,
    )
    .await;

    if let Err(e) = deliver::deliver_results(
        pipeline.messenger.as_ref(),
        task,
        &summarized,
        &pipeline.pacing,
        pipeline.timezone,
    )
    .await
    {
        error!("Failed to deliver results: {}", e);
        if let Err(notify_err) = pipeline
            .messenger
            .push(&task.target_id, &[REQUEST_FAILED_MESSAGE.to_string()])
            .await
        {
            error!("Failed to send error notice: {}", notify_err);
        }
        return;
    }

    info!("Task complete");
}
