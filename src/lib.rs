/// linenews - a LINE chatbot that finds TechOrange articles and summarizes them.
///
/// The crate is split into:
/// 1. An HTTP layer (`api`) that verifies LINE webhooks and acknowledges each
///    message through the reply API
/// 2. A background pipeline (`worker`) that crawls articles (`crawler`),
///    summarizes them with Gemini or an extractive fallback (`ai`) and pushes
///    the results back (`line`)
///
/// # Example
///
/// ```no_run
/// use linenews::api::{AppState, router};
/// use linenews::core::config::AppConfig;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     linenews::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let app = router(AppState::from_config(&config)?);
///
///     let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
///     axum::serve(listener, app).await?;
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod api;
pub mod core;
pub mod crawler;
pub mod errors;
pub mod line;
pub mod utils;
pub mod worker;

pub use errors::BotError;

/// Configure structured JSON logging.
///
/// The level comes from `RUST_LOG` and defaults to `info` (`debug` when the
/// `debug-logs` feature is enabled). Calling this more than once is harmless.
///
/// # Example
///
/// ```
/// linenews::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::{EnvFilter, prelude::*};

    let default_level = if cfg!(feature = "debug-logs") {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
