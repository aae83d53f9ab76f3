//! Background request processing: crawl, summarize, deliver

pub mod deliver;
pub mod handler;
pub mod pipeline;
pub mod summarize;

// Re-export the main entry points for convenience
pub use handler::process_task;
pub use pipeline::{ArticleSource, Messenger, Pacing, Pipeline, Summarizer};
