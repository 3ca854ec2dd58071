//! API request and response types.
//!
//! Wire field names are camelCase and, for the network/token/user routes,
//! match the original surface exactly.

use serde::{Deserialize, Serialize};

use nothing_core::governance::{Proposal, ProposalStatus};
use nothing_core::math::to_ui_amount_u128;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStatus {
    pub network_name: String,
    pub chain_id: String,
    pub connected_nodes: u32,
    pub active_users: u32,
    pub last_update: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkNode {
    pub id: u32,
    pub address: String,
    pub is_current_user: bool,
    pub last_active: i64,
    pub token_balance: f64,
    pub tokens_burned: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenStats {
    pub symbol: String,
    pub name: String,
    pub total_supply: f64,
    pub circulating_supply: f64,
    pub burned_tokens: f64,
    pub holders: u64,
    pub price: f64,
    pub market_cap: f64,
    pub last_update: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBalance {
    pub address: String,
    pub balance: f64,
    pub tokens_burned: f64,
    pub last_transaction: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolInfo {
    pub base_reserve: f64,
    pub token_reserve: f64,
    pub price: f64,
    pub lp_providers: usize,
    pub total_supply: f64,
    pub circulating_supply: f64,
    pub burned_tokens: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteQuery {
    pub amount_in: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub amount_out: f64,
    pub amount_out_raw: f64,
    pub fee_amount: f64,
    pub price_impact_bps: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub address: Option<String>,
    pub amount_in: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapResponse {
    pub amount_out: f64,
    pub fee_amount: f64,
    pub price_impact_bps: u64,
    pub new_price: f64,
    pub balance: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityRequest {
    pub address: Option<String>,
    pub amount_base: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityResponse {
    pub token_amount: f64,
    pub units_issued: f64,
    pub base_reserve: f64,
    pub token_reserve: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnRequest {
    pub address: Option<String>,
    pub amount: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnResponse {
    pub burned: f64,
    pub new_balance: f64,
    pub total_burned: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProposalRequest {
    pub address: Option<String>,
    pub title: String,
    pub description: String,
    pub proposed_supply: f64,
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub address: Option<String>,
    pub support: bool,
}

/// Wire view of a proposal, mirroring the contract's `getProposal` shape.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalView {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub proposed_supply: f64,
    pub proposer: String,
    pub created_at: i64,
    pub end_time: i64,
    pub votes_for: f64,
    pub votes_against: f64,
    pub voter_count: usize,
    pub status: ProposalStatus,
    pub executed: bool,
}

impl From<&Proposal> for ProposalView {
    fn from(proposal: &Proposal) -> Self {
        Self {
            id: proposal.id,
            title: proposal.title.clone(),
            description: proposal.description.clone(),
            proposed_supply: to_ui_amount_u128(proposal.proposed_supply),
            proposer: proposal.proposer.to_string(),
            created_at: proposal.created_at,
            end_time: proposal.end_time,
            votes_for: to_ui_amount_u128(proposal.votes_for),
            votes_against: to_ui_amount_u128(proposal.votes_against),
            voter_count: proposal.voters.len(),
            status: proposal.status,
            executed: proposal.executed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProposalsResponse {
    pub proposals: Vec<ProposalView>,
    pub total: usize,
}
