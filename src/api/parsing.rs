use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::errors::BotError;

pub const DEFAULT_NEWS_COUNT: usize = 3;
pub const MAX_NEWS_COUNT: usize = 10;

/// A text message sent to the bot, reduced to what the pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMessageEvent {
    pub user_id: String,
    /// Group or room id when the message came from a group chat, else the user id.
    pub target_id: String,
    pub reply_token: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIntent {
    Empty,
    Help,
    LatestNews { count: usize },
    KeywordSearch { keyword: String },
}

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

/// Parses a LINE webhook body and keeps only text message events.
///
/// # Errors
///
/// Returns `ParseError` when the body is not a JSON object.
pub fn parse_webhook_body(body: &str) -> Result<Vec<TextMessageEvent>, BotError> {
    let root: Value = serde_json::from_str(body)
        .map_err(|e| BotError::ParseError(format!("Invalid webhook JSON: {e}")))?;
    if !root.is_object() {
        return Err(BotError::ParseError("Webhook body is not an object".to_string()));
    }

    let events = root
        .get("events")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    Ok(events.iter().filter_map(parse_text_event).collect())
}

fn parse_text_event(event: &Value) -> Option<TextMessageEvent> {
    let event_type = v_str(event, &["type"]).unwrap_or("");
    let message_type = v_str(event, &["message", "type"]).unwrap_or("");
    if event_type != "message" || message_type != "text" {
        debug!(event_type, message_type, "Skipping non-text webhook event");
        return None;
    }

    let user_id = v_str(event, &["source", "userId"]).unwrap_or("");
    let target_id = v_str(event, &["source", "groupId"])
        .or_else(|| v_str(event, &["source", "roomId"]))
        .unwrap_or(user_id);
    if target_id.is_empty() {
        debug!("Skipping text event without a push target");
        return None;
    }

    Some(TextMessageEvent {
        user_id: user_id.to_string(),
        target_id: target_id.to_string(),
        reply_token: v_str(event, &["replyToken"]).unwrap_or("").to_string(),
        text: v_str(event, &["message", "text"]).unwrap_or("").to_string(),
    })
}

/// Reads ASCII or full-width (IME) digits; values too large to hold become the maximum.
fn parse_count(digits: &str) -> usize {
    digits
        .chars()
        .filter_map(|c| match c {
            '０'..='９' => Some(c as u32 - '０' as u32),
            _ => c.to_digit(10),
        })
        .try_fold(0usize, |acc, d| acc.checked_mul(10)?.checked_add(d as usize))
        .unwrap_or(MAX_NEWS_COUNT)
}

/// Maps message text to an intent. `/news N` and `新聞 N` ask for the latest
/// N articles (1..=10); anything else that is not a help word is a keyword.
pub fn parse_user_intent(text: &str) -> UserIntent {
    static NEWS_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)^(/news|新聞)\s*([0-9０-９]*)$").expect("static regex compile")
    });

    let text = text.trim();
    if text.is_empty() {
        return UserIntent::Empty;
    }

    let lowered = text.to_lowercase();
    if matches!(lowered.as_str(), "help" | "/help" | "?" | "？" | "說明" | "幫助") {
        return UserIntent::Help;
    }

    if let Some(caps) = NEWS_RE.captures(text) {
        let digits = caps.get(2).map_or("", |m| m.as_str());
        let count = if digits.is_empty() {
            DEFAULT_NEWS_COUNT
        } else {
            parse_count(digits)
        };
        return UserIntent::LatestNews {
            count: count.clamp(1, MAX_NEWS_COUNT),
        };
    }

    UserIntent::KeywordSearch {
        keyword: text.to_string(),
    }
}
