//! Primary-plus-fallback store with explicit mode reporting.

use crate::governance::Proposal;
use crate::store::{ProposalStore, StoreError, StoreMode};

/// Tries the primary store first and falls back on failure. Every
/// operation reports which tier served it; the tiers are not kept in sync
/// and no transactional guarantee exists between them.
pub struct TieredStore<P, F> {
    primary: P,
    fallback: F,
}

impl<P: ProposalStore, F: ProposalStore> TieredStore<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    /// Save to the primary, or to the fallback in degraded mode.
    pub fn save(&self, proposals: &[Proposal]) -> Result<StoreMode, StoreError> {
        match self.primary.save(proposals) {
            Ok(()) => Ok(StoreMode::Primary),
            Err(primary_err) => match self.fallback.save(proposals) {
                Ok(()) => Ok(StoreMode::Degraded),
                Err(fallback_err) => Err(StoreError::AllTiersFailed {
                    primary: primary_err.to_string(),
                    fallback: fallback_err.to_string(),
                }),
            },
        }
    }

    /// Load from the primary, or from the fallback in degraded mode.
    pub fn load(&self) -> Result<(Vec<Proposal>, StoreMode), StoreError> {
        match self.primary.load() {
            Ok(proposals) => Ok((proposals, StoreMode::Primary)),
            Err(primary_err) => match self.fallback.load() {
                Ok(proposals) => Ok((proposals, StoreMode::Degraded)),
                Err(fallback_err) => Err(StoreError::AllTiersFailed {
                    primary: primary_err.to_string(),
                    fallback: fallback_err.to_string(),
                }),
            },
        }
    }
}
