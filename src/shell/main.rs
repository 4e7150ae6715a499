use anyhow::Context;
use std::net::SocketAddr;
use tracing_subscriber::{EnvFilter, fmt};

use incridea_api::shell::config::{AppConfig, load_dotenv};
use incridea_api::shell::http::router;
use incridea_api::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = load_dotenv();
    let config = AppConfig::from_env().context("failed to load configuration")?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.runtime_mode.default_log_filter()));
    fmt().with_env_filter(filter).init();
    if let Err(e) = dotenv {
        tracing::warn!(error = %e, "ignoring malformed .env file");
    }

    let state = AppState::from_config(&config).context("failed to build the media store")?;
    let app = router(state, config.frontend_origin.clone());

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        mode = ?config.runtime_mode,
        "Server running on http://localhost:{}",
        config.port
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "cannot listen for ctrl-c, running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
