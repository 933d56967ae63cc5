// Inkwell API server
// Decision: PostgreSQL when DATABASE_URL is set, otherwise an in-memory dev store
// Decision: Post writes are gated by HTTP Basic auth against registered users

use anyhow::{Context, Result};
use inkwell_core::telemetry::{init_telemetry, TelemetryConfig};
use inkwell_server::auth::AuthConfig;
use inkwell_server::build_app;
use inkwell_server::config::ServerConfig;
use inkwell_server::storage::StorageBackend;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Optional .env file for local development
    let _ = dotenvy::dotenv();

    // Configure via environment variables:
    // - OTEL_SERVICE_NAME: Service name (default: "inkwell-server")
    // - RUST_LOG / LOG_LEVEL: Log filter (default: "inkwell_server=debug,tower_http=debug")
    // - LOG_FORMAT: "json" for JSON lines
    let mut telemetry_config = TelemetryConfig::from_env();
    if telemetry_config.service_name == "inkwell" {
        telemetry_config.service_name = "inkwell-server".to_string();
    }
    if telemetry_config.log_filter.is_none() {
        telemetry_config.log_filter = Some("inkwell_server=debug,tower_http=debug".to_string());
    }
    telemetry_config.service_version = Some(env!("CARGO_PKG_VERSION").to_string());
    init_telemetry(telemetry_config);

    tracing::info!("inkwell-server starting...");

    let config = ServerConfig::from_env().context("Failed to load server configuration")?;

    let db = match config.database_url.as_deref() {
        Some(url) => {
            let db = StorageBackend::postgres(url, config.db_max_connections)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database, migrations applied");
            db
        }
        None => {
            tracing::warn!(
                "DATABASE_URL not set; using in-memory storage (dev mode, data is lost on exit)"
            );
            StorageBackend::in_memory()
        }
    };
    let db = Arc::new(db);

    let auth_config = AuthConfig::from_env();
    tracing::info!(
        realm = %auth_config.realm,
        signup = auth_config.signup_enabled(),
        "Authentication configured"
    );

    if !config.api_prefix.is_empty() {
        tracing::info!(prefix = %config.api_prefix, "API prefix configured");
    }
    if config.cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
    } else {
        tracing::info!(origins = ?config.cors_origins, "CORS origins configured");
    }

    let app = build_app(
        db,
        auth_config,
        &config.api_prefix,
        config.cors_origins.clone(),
    );

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("inkwell-server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
