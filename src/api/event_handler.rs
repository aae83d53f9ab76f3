//! Per-event handling for LINE text messages.
//!
//! Each event gets an immediate acknowledgement through the reply API. Search
//! and latest-news requests then run the full pipeline and push their results.

use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use super::parsing::{TextMessageEvent, UserIntent, parse_user_intent};
use crate::core::models::{ProcessingTask, TaskRequest};
use crate::line::message_formatter::{
    ENTER_KEYWORD_MESSAGE, HELP_MESSAGE, format_fetching_latest_message, format_searching_message,
};
use crate::worker::{Pipeline, process_task};

#[tracing::instrument(
    level = "info",
    skip(pipeline, event),
    fields(user_id = %event.user_id, target_id = %event.target_id)
)]
pub async fn handle_text_event(
    pipeline: Arc<Pipeline>,
    article_count: usize,
    event: TextMessageEvent,
) {
    let intent = parse_user_intent(&event.text);
    info!(?intent, "Received text message");

    let (ack, request) = match intent {
        UserIntent::Empty => (ENTER_KEYWORD_MESSAGE.to_string(), None),
        UserIntent::Help => (HELP_MESSAGE.to_string(), None),
        UserIntent::KeywordSearch { keyword } => (
            format_searching_message(&keyword),
            Some(TaskRequest::KeywordSearch {
                keyword,
                count: article_count,
            }),
        ),
        UserIntent::LatestNews { count } => (
            format_fetching_latest_message(count),
            Some(TaskRequest::LatestNews { count }),
        ),
    };

    if let Err(e) = pipeline.messenger.reply(&event.reply_token, &[ack]).await {
        error!("Failed to send acknowledgement: {}", e);
    }

    let Some(request) = request else {
        return;
    };

    let task = ProcessingTask {
        correlation_id: Uuid::new_v4().to_string(),
        user_id: event.user_id,
        target_id: event.target_id,
        request,
    };
    process_task(&pipeline, &task).await;
}
