//! event-catalog server entry point.
//!
//! Starts the Axum HTTP server with the catalog REST endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use event_catalog::api;
use event_catalog::app_state::AppState;
use event_catalog::auth::TokenCodec;
use event_catalog::config::CatalogConfig;
use event_catalog::service::CatalogService;
use event_catalog::store::EventStore;
use event_catalog::store::memory::MemoryStore;
use event_catalog::store::postgres::PostgresStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = CatalogConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting event-catalog");

    // Pick the store backend: PostgreSQL when configured, in-memory otherwise
    let store: Arc<dyn EventStore> = match &config.database_url {
        Some(url) => {
            let store = PostgresStore::connect(
                url,
                config.database_max_connections,
                Duration::from_secs(config.database_connect_timeout_secs),
            )
            .await?;
            Arc::new(store)
        }
        None => Arc::new(MemoryStore::new()),
    };
    tracing::info!(backend = store.backend_name(), "store backend ready");

    // Build service layer and application state
    let service = Arc::new(CatalogService::new(store));
    let codec = Arc::new(TokenCodec::new(
        &config.jwt_secret,
        Duration::from_secs(config.token_ttl_secs),
    ));
    let app_state = AppState { service, codec };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
