//! Application builder: wires router, middleware, and state into an Axum
//! app, and runs it.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_middleware;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use shelfhub_core::config::AppConfig;
use shelfhub_core::error::AppError;
use shelfhub_database::DatabasePool;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::{AppState, Stores};

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(request_logging))
}

/// Runs the ShelfHub server against a connected, migrated pool until
/// Ctrl+C.
pub async fn run_server(config: AppConfig, db_pool: DatabasePool) -> Result<(), AppError> {
    tracing::info!("Starting ShelfHub server...");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let platform = config.server.platform;
    let stores = Stores::postgres(&db_pool);
    let state = AppState::new(config, db_pool.clone(), stores)?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(addr = %addr, platform = ?platform, "ShelfHub server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db_pool.close().await;
    tracing::info!("ShelfHub server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
