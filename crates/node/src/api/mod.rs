//! REST API for the Nothing App node

mod handlers;
mod responses;
mod routes;

pub use routes::*;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{StatusCode, Uri},
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::state::AppState;

/// Start the API server
pub async fn start_server(
    state: Arc<AppState>,
    bind_address: &str,
) -> Result<tokio::task::JoinHandle<()>> {
    let app = create_app(state);

    let listener = TcpListener::bind(bind_address).await?;
    info!("API server listening on {}", bind_address);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("API server error: {}", e);
        }
    });

    Ok(handle)
}

/// Create the main API application
pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(create_network_routes())
        .merge(create_token_routes())
        .merge(create_pool_routes())
        .merge(create_governance_routes())
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found_handler(uri: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "message": format!("API endpoint {} not found", uri.path()),
        })),
    )
}
