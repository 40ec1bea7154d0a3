//! content-events server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use content_events::api;
use content_events::app_state::AppState;
use content_events::config::{LogFormat, ServiceConfig};
use content_events::domain::{ActionBus, ContentKind};
use content_events::persistence::{PostgresContentRepository, PostgresEventStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    tracing::info!(addr = %config.listen_addr, "starting content-events");

    let app_state = if config.persistence_enabled {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database migrations applied");

        AppState::with_backends(
            Arc::new(PostgresEventStore::new(pool.clone())),
            Arc::new(PostgresContentRepository::new(pool.clone(), ContentKind::Movie)),
            Arc::new(PostgresContentRepository::new(pool, ContentKind::Series)),
            ActionBus::new(config.notification_channel_capacity),
        )
    } else {
        tracing::warn!("persistence disabled; events and counters are kept in memory");
        AppState::in_memory(config.notification_channel_capacity)
    };

    let app = api::build_app(app_state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
