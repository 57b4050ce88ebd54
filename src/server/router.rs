//! Route table and serve loop
//!
//! URI templates bound here:
//! - `/treasures` and `/treasures/{id}` for the full CRUD set
//! - `/users/{user_id}/treasures` for the owner-scoped nested collection
//! - `/users` and `/users/{id}` for the owning resource
//! - `/health` for liveness probes

use crate::server::handlers::{
    create_treasure, create_user, delete_treasure, get_treasure, get_user, health_check,
    list_treasures, list_user_treasures, list_users, update_treasure, AppState,
};
use anyhow::Result;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the application router with all resource routes and layers
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/treasures", get(list_treasures).post(create_treasure))
        .route(
            "/treasures/{id}",
            get(get_treasure)
                .put(update_treasure)
                .patch(update_treasure)
                .delete(delete_treasure),
        )
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user))
        .route("/users/{user_id}/treasures", get(list_user_treasures))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the application with graceful shutdown on SIGTERM / Ctrl+C
pub async fn serve(state: AppState, addr: &str) -> Result<()> {
    let app = build_router(state);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
