//! All summarization functionality

pub mod client;
pub mod extractive;
pub mod prompt_builder;

// Re-export main types for convenience
pub use client::{GeminiClient, ModelStatus};
pub use extractive::{ExtractiveSummarizer, lead_three_summary};
