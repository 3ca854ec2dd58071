//! # Nothing Core - Shared Token Logic
//!
//! This crate contains the domain logic of the Nothing App token system,
//! shared between the node service and any other embedder. It provides:
//!
//! - The constant-product liquidity pool and its supply accounting
//! - The governance ledger (proposals, voting, execution)
//! - The balance ledger collaborators operate against
//! - Overflow-checked fixed-point math
//! - The event seam and the tiered proposal store
//!
//! Everything here is synchronous and deterministic: callers pass unix
//! timestamps in, and all fallible operations return [`CoreResult`].

pub mod constants;
pub mod errors;
pub mod events;
pub mod governance;
pub mod ledger;
pub mod math;
pub mod pool;
pub mod store;

// Re-export commonly used items
pub use constants::*;
pub use errors::{CoreError, CoreResult};
pub use events::{Event, EventSink};
pub use governance::{GovernanceLedger, GovernanceParams, Proposal, ProposalStatus};
pub use ledger::{Address, BalanceLedger};
pub use pool::{LiquidityPool, PoolParams, TokenSupply};
