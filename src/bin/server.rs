//! Director HTTP server binary.
//!
//! # Environment Variables
//!
//! - `DIRECTOR_CONFIG` — Optional YAML config file
//! - `HOST` — Bind address (default: 0.0.0.0)
//! - `PORT` — HTTP port (default: 8080)
//! - `RUST_LOG` — Tracing filter (default: "info,anomaly_director=debug")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! ```

use anyhow::Context;
use anomaly_director::config::DirectorConfig;
use anomaly_director::server::{app_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,anomaly_director=debug".into()),
        )
        .init();

    let config = DirectorConfig::load().context("Failed to load configuration")?;
    let bind_addr = config.server.bind_addr();

    let state = AppState::from_config(&config);
    let app = app_router(state);

    tracing::info!("anomaly-director server starting on {}", bind_addr);
    tracing::info!(
        "default session '{}', uncertain-band probability {}",
        config.default_session,
        config.policy.uncertain_probability
    );
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health               — liveness probe");
    tracing::info!("  POST /analyze              — observation, default session");
    tracing::info!("  POST /evaluate             — stateless snapshot decision");
    tracing::info!("  POST /sessions/:id/analyze — observation, named session");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    tracing::info!("anomaly-director server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
