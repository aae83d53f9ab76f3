//! All LINE-specific functionality

pub mod client;
pub mod message_formatter;
pub mod response_builder;

// Re-export main types for convenience
pub use client::{LineClient, MAX_MESSAGES_PER_REQUEST};
