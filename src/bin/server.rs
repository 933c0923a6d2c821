use std::sync::Arc;

use anyhow::Result;
use billdesk::{
    backend::{AppState, router::build_router},
    utils::{config::AppConfig, logs_fmt::init_server_logging},
};
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = AppConfig::load()?;
    init_server_logging(cfg.log_json);

    info!(
        api_url = %cfg.api_url,
        port = cfg.port,
        auth_mode = ?cfg.auth_mode,
        "billdesk server starting"
    );

    let addr = format!("0.0.0.0:{}", cfg.port);
    let state = Arc::new(AppState::new(cfg)?);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            info!("Received shutdown signal");
        })
        .await?;

    info!("Shutting down gracefully...");
    Ok(())
}
