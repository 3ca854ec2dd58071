//! API route definitions

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::*;
use crate::state::AppState;

/// Mock network surface, preserved from the original server.
pub fn create_network_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/network/status", get(network_status))
        .route("/api/network/nodes", get(network_nodes))
}

/// Token stats and the default wallet's balance.
pub fn create_token_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/token/stats", get(token_stats))
        .route("/api/user/balance", get(user_balance))
}

/// Pool operations.
pub fn create_pool_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/pool/info", get(pool_info))
        .route("/api/pool/quote", get(pool_quote))
        .route("/api/pool/liquidity", post(pool_liquidity))
        .route("/api/pool/swap", post(pool_swap))
        .route("/api/pool/burn", post(pool_burn))
}

/// Proposal lifecycle.
pub fn create_governance_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/governance/proposals",
            get(list_proposals).post(create_proposal),
        )
        .route("/api/governance/proposals/:id", get(get_proposal))
        .route("/api/governance/proposals/:id/votes", post(cast_vote))
}
