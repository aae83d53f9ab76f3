//! Inbound webhook handling and request processing

pub mod event_handler;
pub mod handler;
pub mod parsing;
pub mod signature;

// Re-export the router for convenience
pub use handler::{AppState, router};
