//! API request handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use rand::Rng;

use nothing_core::governance::{GovernanceLedger, ProposalStatus};
use nothing_core::ledger::Address;
use nothing_core::math::{from_ui_amount, from_ui_amount_u128, to_ui_amount, to_ui_amount_u128};
use nothing_core::store::StoreMode;
use nothing_core::CoreError;

use super::responses::*;
use crate::error::NodeError;
use crate::state::AppState;

const NETWORK_NAME: &str = "Avalanche Mainnet";
const CHAIN_ID: &str = "0xa86a";
const BASE_HOLDER_COUNT: u64 = 500;

/// Addresses cycled through when generating mock peers.
const SAMPLE_ADDRESSES: &[&str] = &[
    "0x742d35Cc6634C0532925a3b844Bc454e4438f44e",
    "0x8fD00f170FDf3772C5ebdCD90bF257316c69BA45",
    "0xD3CdA913deB6f67967B99D67aCDFa1712C293601",
    "0x21b42413bA931038f35e7A5224FaDb065d297D3B",
    "0x71c7656ec7ab88b098defb751b7401b5f6d8976f",
    "0x7cB57B5A97eAbe94205C07890BE4c1aD31E486A8",
    "0x9965507D1a55bcC2695C58ba16FB37d819B0A4dc",
];

fn iso_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Requests may carry an explicit address; otherwise the node's default
/// wallet acts as the identity.
fn resolve_address(state: &AppState, requested: &Option<String>) -> Result<Address, NodeError> {
    match requested {
        Some(s) => Ok(Address::parse(s)?),
        None => Ok(state.wallet.clone()),
    }
}

/// Persist the proposal set, surfacing degraded writes in the log.
fn persist(state: &AppState, governance: &GovernanceLedger) -> Result<(), NodeError> {
    if state.save_proposals(governance)? == StoreMode::Degraded {
        tracing::warn!("proposal store degraded: wrote to fallback tier only");
    }
    Ok(())
}

// ============================================================================
// Network mock surface
// ============================================================================

pub async fn network_status(State(state): State<Arc<AppState>>) -> Json<NetworkStatus> {
    let connected = state.simulate_connection();
    Json(NetworkStatus {
        network_name: NETWORK_NAME.to_string(),
        chain_id: CHAIN_ID.to_string(),
        connected_nodes: connected.max(3),
        active_users: (connected as f64 * 0.7) as u32,
        last_update: iso_now(),
    })
}

pub async fn network_nodes(State(state): State<Arc<AppState>>) -> Json<Vec<NetworkNode>> {
    let connected = state.simulate_connection();
    let count = connected.clamp(5, 50);
    let now_ms = Utc::now().timestamp_millis();

    let ledger = state.ledger.read().await;
    let mut nodes = vec![NetworkNode {
        id: 1,
        address: state.wallet.to_string(),
        is_current_user: true,
        last_active: now_ms - 60_000,
        token_balance: to_ui_amount(ledger.balance(&state.wallet)),
        tokens_burned: to_ui_amount(ledger.burned(&state.wallet)),
    }];
    drop(ledger);

    let mut rng = rand::thread_rng();
    for id in 2..=count {
        let address = SAMPLE_ADDRESSES[(id as usize - 2) % SAMPLE_ADDRESSES.len()];
        nodes.push(NetworkNode {
            id,
            address: address.to_string(),
            is_current_user: false,
            last_active: now_ms - rng.gen_range(0..3_600_000),
            token_balance: rng.gen_range(0..10_000) as f64,
            tokens_burned: rng.gen_range(0..1_000) as f64,
        });
    }
    Json(nodes)
}

// ============================================================================
// Token and user surface
// ============================================================================

pub async fn token_stats(State(state): State<Arc<AppState>>) -> Json<TokenStats> {
    let pool = state.pool.read().await;
    let supply = pool.supply();
    let price = pool.spot_price();
    let circulating = to_ui_amount_u128(supply.circulating());

    Json(TokenStats {
        symbol: "NTH".to_string(),
        name: "Nothing Token".to_string(),
        total_supply: to_ui_amount_u128(supply.max()),
        circulating_supply: circulating,
        burned_tokens: to_ui_amount_u128(supply.burned()),
        holders: BASE_HOLDER_COUNT + state.connected() as u64,
        price,
        market_cap: circulating * price,
        last_update: iso_now(),
    })
}

pub async fn user_balance(State(state): State<Arc<AppState>>) -> Json<UserBalance> {
    let ledger = state.ledger.read().await;
    Json(UserBalance {
        address: state.wallet.to_string(),
        balance: to_ui_amount(ledger.balance(&state.wallet)),
        tokens_burned: to_ui_amount(ledger.burned(&state.wallet)),
        last_transaction: iso_now(),
    })
}

// ============================================================================
// Pool surface
// ============================================================================

pub async fn pool_info(State(state): State<Arc<AppState>>) -> Json<PoolInfo> {
    let pool = state.pool.read().await;
    let supply = pool.supply();
    Json(PoolInfo {
        base_reserve: to_ui_amount(pool.base_reserve()),
        token_reserve: to_ui_amount(pool.token_reserve()),
        price: pool.spot_price(),
        lp_providers: pool.provider_count(),
        total_supply: to_ui_amount_u128(supply.max()),
        circulating_supply: to_ui_amount_u128(supply.circulating()),
        burned_tokens: to_ui_amount_u128(supply.burned()),
    })
}

pub async fn pool_quote(
    State(state): State<Arc<AppState>>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<QuoteResponse>, NodeError> {
    let amount_in = from_ui_amount(query.amount_in)?;
    let pool = state.pool.read().await;
    let quote = pool.quote_swap(amount_in)?;
    Ok(Json(QuoteResponse {
        amount_out: to_ui_amount(quote.amount_out),
        amount_out_raw: to_ui_amount(quote.amount_out_raw),
        fee_amount: to_ui_amount(quote.fee_amount),
        price_impact_bps: quote.impact_bps,
    }))
}

pub async fn pool_swap(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SwapRequest>,
) -> Result<Json<SwapResponse>, NodeError> {
    let buyer = resolve_address(&state, &req.address)?;
    let amount_in = from_ui_amount(req.amount_in)?;

    let mut pool = state.pool.write().await;
    let mut ledger = state.ledger.write().await;
    let quote = pool.swap(&mut ledger, &buyer, amount_in)?;

    Ok(Json(SwapResponse {
        amount_out: to_ui_amount(quote.amount_out),
        fee_amount: to_ui_amount(quote.fee_amount),
        price_impact_bps: quote.impact_bps,
        new_price: pool.spot_price(),
        balance: to_ui_amount(ledger.balance(&buyer)),
    }))
}

pub async fn pool_liquidity(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LiquidityRequest>,
) -> Result<Json<LiquidityResponse>, NodeError> {
    let provider = resolve_address(&state, &req.address)?;
    let amount_base = from_ui_amount(req.amount_base)?;

    let mut pool = state.pool.write().await;
    let mut ledger = state.ledger.write().await;
    let receipt = pool.add_liquidity(&mut ledger, &provider, amount_base)?;

    Ok(Json(LiquidityResponse {
        token_amount: to_ui_amount(receipt.token_amount),
        units_issued: to_ui_amount_u128(receipt.units_issued),
        base_reserve: to_ui_amount(pool.base_reserve()),
        token_reserve: to_ui_amount(pool.token_reserve()),
    }))
}

pub async fn pool_burn(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BurnRequest>,
) -> Result<Json<BurnResponse>, NodeError> {
    let holder = resolve_address(&state, &req.address)?;
    let amount = from_ui_amount(req.amount)?;

    let mut pool = state.pool.write().await;
    let mut ledger = state.ledger.write().await;
    let new_balance = pool.burn(&mut ledger, &holder, amount)?;

    Ok(Json(BurnResponse {
        burned: to_ui_amount(amount),
        new_balance: to_ui_amount(new_balance),
        total_burned: to_ui_amount(ledger.burned(&holder)),
    }))
}

// ============================================================================
// Governance surface
// ============================================================================

pub async fn list_proposals(State(state): State<Arc<AppState>>) -> Json<ProposalsResponse> {
    let governance = state.governance.read().await;
    let mut proposals: Vec<ProposalView> =
        governance.proposals().iter().map(ProposalView::from).collect();

    // Active first, then newest
    proposals.sort_by(|a, b| {
        let a_active = a.status == ProposalStatus::Active;
        let b_active = b.status == ProposalStatus::Active;
        b_active
            .cmp(&a_active)
            .then(b.created_at.cmp(&a.created_at))
    });

    let total = proposals.len();
    Json(ProposalsResponse { proposals, total })
}

pub async fn get_proposal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<ProposalView>, NodeError> {
    let governance = state.governance.read().await;
    let proposal = governance
        .proposal(id)
        .ok_or(CoreError::ProposalNotFound(id))?;
    Ok(Json(ProposalView::from(proposal)))
}

pub async fn create_proposal(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateProposalRequest>,
) -> Result<Json<ProposalView>, NodeError> {
    let proposer = resolve_address(&state, &req.address)?;
    let proposed_supply = from_ui_amount_u128(req.proposed_supply)?;
    let now = Utc::now().timestamp();

    let pool = state.pool.read().await;
    let mut governance = state.governance.write().await;
    let id = {
        let ledger = state.ledger.read().await;
        governance.create_proposal(
            &ledger,
            pool.supply(),
            &proposer,
            &req.title,
            &req.description,
            proposed_supply,
            now,
        )?
    };

    persist(&state, &governance)?;
    let proposal = governance
        .proposal(id)
        .ok_or(CoreError::ProposalNotFound(id))?;
    Ok(Json(ProposalView::from(proposal)))
}

pub async fn cast_vote(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(req): Json<VoteRequest>,
) -> Result<Json<ProposalView>, NodeError> {
    let voter = resolve_address(&state, &req.address)?;
    let now = Utc::now().timestamp();

    let mut pool = state.pool.write().await;
    let mut governance = state.governance.write().await;
    let status = {
        let ledger = state.ledger.read().await;
        let supply = *pool.supply();
        governance.cast_vote(&ledger, &supply, id, &voter, req.support, now)?
    };

    // An early supermajority executes without waiting for the evaluator.
    if status == ProposalStatus::Passed {
        governance.execute(&mut pool, id)?;
    }

    persist(&state, &governance)?;
    let proposal = governance
        .proposal(id)
        .ok_or(CoreError::ProposalNotFound(id))?;
    Ok(Json(ProposalView::from(proposal)))
}
