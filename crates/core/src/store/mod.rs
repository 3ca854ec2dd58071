//! # Proposal Persistence
//!
//! The original wrote proposals to a remote contract and silently fell back
//! to local storage on failure. Here the two tiers are explicit: a
//! [`TieredStore`] tries its primary and reports [`StoreMode::Degraded`]
//! when it had to use the fallback, so callers can surface the divergence
//! instead of discovering it later.

mod file;
mod memory;
mod tiered;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use tiered::TieredStore;

use thiserror::Error;

use crate::governance::Proposal;

/// Persistence errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("All store tiers failed: primary: {primary}; fallback: {fallback}")]
    AllTiersFailed { primary: String, fallback: String },
}

/// Which tier served an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    Primary,
    Degraded,
}

/// A sink for the proposal ledger. Implementations persist the full set on
/// every save; proposal volumes here never justify deltas.
pub trait ProposalStore: Send + Sync {
    fn save(&self, proposals: &[Proposal]) -> Result<(), StoreError>;
    fn load(&self) -> Result<Vec<Proposal>, StoreError>;
}
