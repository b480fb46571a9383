//! The HTTP layer.
//!
//! Server-rendered pages over the core normalization pipeline and the
//! stores. The router is exposed separately from the listener so tests
//! can drive it with `tower::ServiceExt::oneshot`.

pub mod auth;
pub mod config;
pub mod routes;
pub mod state;
pub mod views;

use anyhow::{Context, Result};
use axum::Router;

pub use config::{load_config, load_config_from, ServerConfig};
pub use state::AppState;

/// The full application router bound to its state.
pub fn app(state: AppState) -> Router {
    routes::router().with_state(state)
}

/// Run the server until shutdown.
pub async fn serve(config: ServerConfig) -> Result<()> {
    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("failed to create data dir {}", config.data_dir.display()))?;

    let bind = config.bind.clone();
    let state = AppState::new(config);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!(addr = %bind, "quizdeck listening");

    axum::serve(listener, app(state))
        .await
        .context("server error")?;
    Ok(())
}
