//! isotype HTTP server binary.
//!
//! # Environment Variables
//!
//! - `PORT` — HTTP port (default: 8080)
//! - `ISOTYPE_CONFIG` — Path to a YAML config file (default: built-in values)
//! - `RUST_LOG` — Tracing filter (default: "info,isotype=debug")
//!
//! # Usage
//!
//! ```bash
//! ISOTYPE_CONFIG=isotype.yaml cargo run --bin server
//! ```

use anyhow::Context;
use isotype::config::IsotypeConfig;
use isotype::server::{app_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,isotype=debug".into()),
        )
        .init();

    let config = IsotypeConfig::from_env().context("Failed to load isotype config")?;
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_addr = format!("0.0.0.0:{}", port);

    let app = app_router(AppState::new(config));

    tracing::info!("isotype server starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health  — liveness probe");
    tracing::info!("  GET  /config  — active configuration");
    tracing::info!("  POST /profile — subjectivity profile for one text");
    tracing::info!("  POST /render  — render plan for a frame");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}
