use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use accentscan_core::{config::Config, pipeline::Pipeline};

use crate::web;

pub async fn run(bind: Option<&str>, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let pipeline = Pipeline::from_config(&config)?;

    let addr = bind.unwrap_or(&config.server.bind);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(
        "Serving accent classifier on http://{} (model: {})",
        listener.local_addr()?,
        pipeline.model_name()
    );

    axum::serve(listener, web::router(Arc::new(pipeline)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
