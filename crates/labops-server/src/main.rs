//! LabOps server binary
//!
//! REST API for laboratory and computer fleet management.

use anyhow::Context;
use axum::{routing::get, Router};
use labops_common::logging::{init_logging, LogConfig};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::compression::CompressionLayer;

use labops_server::config::Config;
use labops_server::{features, middleware};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    let log_config = LogConfig::from_env()
        .unwrap_or_default()
        .with_file_prefix("labops-server");
    init_logging(&log_config).context("Failed to initialize logging")?;

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        "Starting LabOps server"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(config.database.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.database.idle_timeout_secs))
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations applied");

    let app = Router::new()
        .route("/health", get(health))
        .with_state(pool.clone())
        .nest("/api/v1", features::router(pool))
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!(%addr, "LabOps server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await
        .context("Server error")?;

    tracing::info!("LabOps server stopped");

    Ok(())
}

/// Health check endpoint verifying database connectivity
async fn health(
    axum::extract::State(pool): axum::extract::State<sqlx::PgPool>,
) -> axum::http::StatusCode {
    match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&pool).await {
        Ok(_) => axum::http::StatusCode::OK,
        Err(err) => {
            tracing::error!("Health check failed: {}", err);
            axum::http::StatusCode::SERVICE_UNAVAILABLE
        },
    }
}

/// Waits for SIGINT or SIGTERM, then allows in-flight requests to drain
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", err);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {}", err);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");

    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}
