use anyhow::Context;
use goodkraken::{AppConfig, Ctx, create_router, logging};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    let _log_guard = logging::init(&config.log).context("failed to initialize logging")?;

    let addr = config.server.socket_addr()?;
    let ctx = Ctx::from_config(config).context("failed to build upstream clients")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("goodkraken {} listening on {addr}", env!("CARGO_PKG_VERSION"));

    axum::serve(listener, create_router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
