use anyhow::Context;
use linenews::api::{AppState, router};
use linenews::core::config::AppConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    linenews::setup_logging();

    let config = AppConfig::from_env()
        .map_err(anyhow::Error::msg)
        .context("failed to load configuration")?;
    let state = AppState::from_config(&config).context("failed to build pipeline")?;

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    info!(port = config.port, "LINE News Bot listening");

    axum::serve(listener, router(state))
        .await
        .context("server error")?;
    Ok(())
}
