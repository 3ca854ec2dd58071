//! # Governance Ledger
//!
//! Supply-change proposals with balance-weighted voting. Vote weight is the
//! voter's balance at cast time and is never re-weighted. A proposal leaves
//! `Active` exactly once — either early, on an overwhelming supermajority,
//! or when its window elapses — and execution is an orthogonal, idempotent
//! step that applies the new supply to the pool.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::constants::{
    tokens_u128, DEFAULT_MIN_PROPOSER_BPS, DEFAULT_QUORUM_BPS, DEFAULT_VOTING_PERIOD_SECS,
    EARLY_PASS_DOMINANCE, EARLY_PASS_SUPPLY_BPS, SUPPLY_FLOOR_TOKENS,
};
use crate::errors::{CoreError, CoreResult};
use crate::events::{Event, EventSink, NullSink};
use crate::ledger::{Address, BalanceLedger};
use crate::math::safe::{bps_of_u128, safe_add_u128, safe_mul_u128};
use crate::pool::{LiquidityPool, TokenSupply};

/// Lifecycle states. `Active` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Active,
    Passed,
    Rejected,
    FailedQuorum,
}

/// One cast vote, recorded permanently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub support: bool,
    pub weight: u64,
    pub cast_at: i64,
}

/// A supply-change proposal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub proposed_supply: u128,
    pub proposer: Address,
    pub created_at: i64,
    pub end_time: i64,
    pub votes_for: u128,
    pub votes_against: u128,
    pub voters: HashMap<Address, VoteRecord>,
    pub status: ProposalStatus,
    pub executed: bool,
}

/// Governance thresholds, in basis points of max supply unless noted.
#[derive(Debug, Clone, Copy)]
pub struct GovernanceParams {
    pub quorum_bps: u64,
    pub min_proposer_bps: u64,
    pub voting_period_secs: i64,
    pub early_pass_supply_bps: u64,
    pub early_pass_dominance: u128,
    /// Absolute floor for proposed supplies, in base units.
    pub supply_floor: u128,
}

impl Default for GovernanceParams {
    fn default() -> Self {
        Self {
            quorum_bps: DEFAULT_QUORUM_BPS,
            min_proposer_bps: DEFAULT_MIN_PROPOSER_BPS,
            voting_period_secs: DEFAULT_VOTING_PERIOD_SECS,
            early_pass_supply_bps: EARLY_PASS_SUPPLY_BPS,
            early_pass_dominance: EARLY_PASS_DOMINANCE,
            supply_floor: tokens_u128(SUPPLY_FLOOR_TOKENS),
        }
    }
}

/// The proposal ledger.
pub struct GovernanceLedger {
    proposals: Vec<Proposal>,
    next_id: u64,
    params: GovernanceParams,
    events: Arc<dyn EventSink>,
}

impl GovernanceLedger {
    pub fn new(params: GovernanceParams) -> Self {
        Self::with_events(params, Arc::new(NullSink))
    }

    pub fn with_events(params: GovernanceParams, events: Arc<dyn EventSink>) -> Self {
        Self {
            proposals: Vec::new(),
            next_id: 1,
            params,
            events,
        }
    }

    /// Restore a ledger from persisted proposals, resuming the id counter
    /// past the highest restored id.
    pub fn from_proposals(
        params: GovernanceParams,
        proposals: Vec<Proposal>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        let next_id = proposals.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            proposals,
            next_id,
            params,
            events,
        }
    }

    // ========================================================================
    // Read side
    // ========================================================================

    pub fn proposal(&self, id: u64) -> Option<&Proposal> {
        self.proposals.iter().find(|p| p.id == id)
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    pub fn params(&self) -> &GovernanceParams {
        &self.params
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Open a proposal. The proposer must hold at least the threshold share
    /// of max supply, and is recorded as an implicit "for" voter with their
    /// full balance.
    pub fn create_proposal(
        &mut self,
        ledger: &BalanceLedger,
        supply: &TokenSupply,
        proposer: &Address,
        title: &str,
        description: &str,
        proposed_supply: u128,
        now: i64,
    ) -> CoreResult<u64> {
        if title.trim().is_empty() {
            return Err(CoreError::InvalidProposal("title is required"));
        }
        if description.trim().is_empty() {
            return Err(CoreError::InvalidProposal("description is required"));
        }
        if proposed_supply < self.params.supply_floor {
            return Err(CoreError::SupplyBelowFloor);
        }

        let balance = ledger.balance(proposer);
        let needed = bps_of_u128(supply.max(), self.params.min_proposer_bps)?;
        if (balance as u128) < needed {
            return Err(CoreError::ProposalThresholdNotMet {
                needed,
                available: balance,
            });
        }

        let id = self.next_id;
        self.next_id += 1;

        let mut voters = HashMap::new();
        voters.insert(
            proposer.clone(),
            VoteRecord {
                support: true,
                weight: balance,
                cast_at: now,
            },
        );

        self.proposals.push(Proposal {
            id,
            title: title.to_string(),
            description: description.to_string(),
            proposed_supply,
            proposer: proposer.clone(),
            created_at: now,
            end_time: now + self.params.voting_period_secs,
            votes_for: balance as u128,
            votes_against: 0,
            voters,
            status: ProposalStatus::Active,
            executed: false,
        });

        self.events.publish(&Event::ProposalCreated {
            id,
            proposer: proposer.clone(),
        });

        Ok(id)
    }

    /// Cast a vote weighted by the voter's current balance, then re-check
    /// the early-pass rule. Returns the proposal's (possibly updated)
    /// status.
    pub fn cast_vote(
        &mut self,
        ledger: &BalanceLedger,
        supply: &TokenSupply,
        id: u64,
        voter: &Address,
        support: bool,
        now: i64,
    ) -> CoreResult<ProposalStatus> {
        let params = self.params;
        let events = Arc::clone(&self.events);
        let proposal = self
            .proposals
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CoreError::ProposalNotFound(id))?;

        if proposal.status != ProposalStatus::Active || now > proposal.end_time {
            return Err(CoreError::VotingClosed);
        }
        let weight = ledger.balance(voter);
        if weight == 0 {
            return Err(CoreError::NoVotingPower);
        }
        if proposal.voters.contains_key(voter) {
            return Err(CoreError::AlreadyVoted);
        }

        if support {
            proposal.votes_for = safe_add_u128(proposal.votes_for, weight as u128)?;
        } else {
            proposal.votes_against = safe_add_u128(proposal.votes_against, weight as u128)?;
        }
        proposal.voters.insert(
            voter.clone(),
            VoteRecord {
                support,
                weight,
                cast_at: now,
            },
        );

        events.publish(&Event::VoteCast {
            id,
            voter: voter.clone(),
            support,
            weight,
        });

        if let Some(status) = evaluate(proposal, &params, supply, now)? {
            proposal.status = status;
            events.publish(&Event::ProposalFinalized { id, status });
        }

        Ok(proposal.status)
    }

    /// Evaluate every active proposal, returning the ids that transitioned
    /// and their new status. Run periodically and after votes.
    pub fn finalize_due(
        &mut self,
        supply: &TokenSupply,
        now: i64,
    ) -> CoreResult<Vec<(u64, ProposalStatus)>> {
        let params = self.params;
        let events = Arc::clone(&self.events);
        let mut transitions = Vec::new();

        for proposal in &mut self.proposals {
            if let Some(status) = evaluate(proposal, &params, supply, now)? {
                proposal.status = status;
                events.publish(&Event::ProposalFinalized {
                    id: proposal.id,
                    status,
                });
                transitions.push((proposal.id, status));
            }
        }

        Ok(transitions)
    }

    /// Apply a passed proposal's supply change to the pool. Idempotent:
    /// re-executing returns `Ok(false)` without touching anything.
    pub fn execute(&mut self, pool: &mut LiquidityPool, id: u64) -> CoreResult<bool> {
        let events = Arc::clone(&self.events);
        let proposal = self
            .proposals
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CoreError::ProposalNotFound(id))?;

        if proposal.executed {
            return Ok(false);
        }
        if proposal.status != ProposalStatus::Passed {
            return Err(CoreError::ProposalNotPassed(id));
        }

        pool.set_max_supply(proposal.proposed_supply)?;
        proposal.executed = true;

        events.publish(&Event::ProposalExecuted {
            id,
            new_supply: proposal.proposed_supply,
        });

        Ok(true)
    }
}

/// Terminal-state rules for an active proposal. Returns the new status when
/// a transition applies.
fn evaluate(
    proposal: &Proposal,
    params: &GovernanceParams,
    supply: &TokenSupply,
    now: i64,
) -> CoreResult<Option<ProposalStatus>> {
    if proposal.status != ProposalStatus::Active {
        return Ok(None);
    }

    // Overwhelming early support closes the vote regardless of time.
    let early_threshold = bps_of_u128(supply.max(), params.early_pass_supply_bps)?;
    let dominated = match safe_mul_u128(proposal.votes_against, params.early_pass_dominance) {
        Ok(bound) => proposal.votes_for > bound,
        // An "against" tally huge enough to overflow cannot be dominated.
        Err(_) => false,
    };
    if proposal.votes_for > early_threshold && dominated {
        return Ok(Some(ProposalStatus::Passed));
    }

    if now <= proposal.end_time {
        return Ok(None);
    }

    let turnout = safe_add_u128(proposal.votes_for, proposal.votes_against)?;
    let quorum = bps_of_u128(supply.max(), params.quorum_bps)?;
    if turnout < quorum {
        Ok(Some(ProposalStatus::FailedQuorum))
    } else if proposal.votes_for > proposal.votes_against {
        Ok(Some(ProposalStatus::Passed))
    } else {
        // Ties go against the proposal.
        Ok(Some(ProposalStatus::Rejected))
    }
}
