//! HTTP surface - thin axum router that verifies LINE webhooks and hands each
//! text event to a background task.
//!
//! Routes:
//! - `GET /` usage page
//! - `GET /health` liveness probe
//! - `GET|POST /test` method echo
//! - `GET /callback` verification probe
//! - `POST /callback` signed LINE webhook

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tracing::{error, info, warn};

use super::{event_handler, parsing, signature};
use crate::core::config::AppConfig;
use crate::errors::BotError;
use crate::worker::Pipeline;

pub const SIGNATURE_HEADER: &str = "x-line-signature";

const INDEX_HTML: &str = "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>LINE News Bot</title></head>\n<body>\n<h1>LINE News Bot</h1>\n<p>TechOrange 新聞摘要機器人正在運行。</p>\n<ul>\n<li>輸入關鍵字搜尋相關文章並取得 AI 摘要</li>\n<li>輸入 <code>/news N</code> 取得最新 N 則新聞</li>\n</ul>\n<p>Webhook URL: <code>/callback</code></p>\n</body></html>\n";

#[derive(Clone)]
pub struct AppState {
    pub channel_secret: Arc<str>,
    pub article_count: usize,
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    /// # Errors
    ///
    /// Returns an error if the pipeline's clients cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, BotError> {
        Ok(Self {
            channel_secret: Arc::from(config.line_channel_secret.as_str()),
            article_count: config.article_count,
            pipeline: Arc::new(Pipeline::from_config(config)?),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/test", get(echo_method).post(echo_method))
        .route("/callback", get(callback_probe).post(callback))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "message": "LINE News Bot is running" }))
}

async fn echo_method(method: Method) -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "method": method.as_str() }))
}

async fn callback_probe() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "message": "Webhook endpoint is ready" }))
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, message.to_string()).into_response()
}

#[tracing::instrument(level = "info", skip_all)]
async fn callback(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let Some(signature) = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
    else {
        warn!("Webhook request missing signature header");
        return bad_request("Missing signature");
    };

    let Ok(body) = std::str::from_utf8(&body) else {
        error!("Webhook body is not valid UTF-8");
        return bad_request("Invalid body");
    };

    if !signature::verify_line_signature(body, signature, &state.channel_secret) {
        error!(error = %BotError::SignatureError, "Rejecting webhook");
        return bad_request("Invalid signature");
    }

    let events = match parsing::parse_webhook_body(body) {
        Ok(events) => events,
        Err(e) => {
            error!("Failed to parse webhook body: {}", e);
            return bad_request("Invalid body");
        }
    };

    info!(count = events.len(), "Dispatching text events");
    for event in events {
        let pipeline = Arc::clone(&state.pipeline);
        tokio::spawn(event_handler::handle_text_event(
            pipeline,
            state.article_count,
            event,
        ));
    }

    (StatusCode::OK, "OK").into_response()
}
