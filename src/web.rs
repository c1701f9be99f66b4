use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::sync::Notify;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};

use crate::api::{self, ApiState};
use crate::app::WeatherApp;
use crate::config::ServerConfig;

/// Full HTTP application with CORS and the request body limit applied
pub fn build_router(app: Arc<WeatherApp>, shutdown: Arc<Notify>, max_body_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api::router(ApiState::new(app, shutdown))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(cors)
}

/// Serve until `/collect/exit` is called or Ctrl-C is received
pub async fn run(app: Arc<WeatherApp>, config: &ServerConfig) -> Result<()> {
    let shutdown = Arc::new(Notify::new());
    let router = build_router(app, shutdown.clone(), config.max_body_bytes);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Weather server running at http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("Weather server failed")?;

    info!("Weather server stopped");
    Ok(())
}

async fn shutdown_signal(exit: Arc<Notify>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        () = ctrl_c => info!("Ctrl-C received, shutting down"),
        () = exit.notified() => info!("Exit requested, shutting down"),
    }
}
