//! atlas-marketplace server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use atlas_marketplace::api;
use atlas_marketplace::app_state::AppState;
use atlas_marketplace::config::MarketplaceConfig;
use atlas_marketplace::domain::EventBus;
use atlas_marketplace::persistence::memory::MemorySlotStore;
use atlas_marketplace::persistence::postgres::PostgresSlotStore;
use atlas_marketplace::persistence::SlotStore;
use atlas_marketplace::service::MarketplaceService;
use atlas_marketplace::store::MarketplaceStore;
use atlas_marketplace::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = MarketplaceConfig::from_env().map_err(|e| anyhow::anyhow!(e.to_string()))?;
    tracing::info!(addr = %config.listen_addr, "starting atlas-marketplace");

    // Build persistence layer
    let slots: Arc<dyn SlotStore> = if config.persistence_enabled {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(std::time::Duration::from_secs(
                config.database_connect_timeout_secs,
            ))
            .connect(&config.database_url)
            .await?;
        let store = PostgresSlotStore::new(pool);
        store.ensure_schema().await?;
        tracing::info!("postgres slot store ready");
        Arc::new(store)
    } else {
        tracing::warn!("persistence disabled; collections are process-local");
        Arc::new(MemorySlotStore::new())
    };

    // Build domain and service layers
    let store = Arc::new(MarketplaceStore::new(slots));
    let event_bus = EventBus::new(config.event_bus_capacity);
    let marketplace = Arc::new(MarketplaceService::new(store, event_bus.clone()));

    // Build application state
    let app_state = AppState {
        marketplace,
        event_bus,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler));

    #[cfg(feature = "swagger-ui")]
    let app = {
        use utoipa::OpenApi;
        app.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", api::ApiDoc::openapi()),
        )
    };

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
