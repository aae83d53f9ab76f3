//! Request payloads for the LINE Messaging API.

use serde_json::{Value, json};

use crate::utils::text::take_chars;

/// Hard limit LINE enforces on a single text message.
pub const TEXT_MESSAGE_LIMIT: usize = 5000;

/// Build a text message object, clipped to the platform limit.
///
/// # Examples
///
/// ```
/// use linenews::line::response_builder::text_message;
///
/// let msg = text_message("hello");
/// assert_eq!(msg["type"], "text");
/// assert_eq!(msg["text"], "hello");
/// ```
#[must_use]
pub fn text_message(text: &str) -> Value {
    json!({
        "type": "text",
        "text": take_chars(text, TEXT_MESSAGE_LIMIT),
    })
}

#[must_use]
pub fn create_reply_payload(reply_token: &str, messages: &[String]) -> Value {
    json!({
        "replyToken": reply_token,
        "messages": messages.iter().map(|m| text_message(m)).collect::<Vec<_>>(),
    })
}

#[must_use]
pub fn create_push_payload(to: &str, messages: &[String]) -> Value {
    json!({
        "to": to,
        "messages": messages.iter().map(|m| text_message(m)).collect::<Vec<_>>(),
    })
}
