//! In-memory store for tests and ephemeral deployments.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::governance::Proposal;
use crate::store::{ProposalStore, StoreError};

/// Holds the proposal set in memory. Can be flagged unavailable to
/// exercise degraded-mode paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    proposals: Mutex<Vec<Proposal>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent operations fail, as a downed primary would.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store offline".to_string()));
        }
        Ok(())
    }
}

impl ProposalStore for MemoryStore {
    fn save(&self, proposals: &[Proposal]) -> Result<(), StoreError> {
        self.check_available()?;
        *self.proposals.lock().expect("store poisoned") = proposals.to_vec();
        Ok(())
    }

    fn load(&self) -> Result<Vec<Proposal>, StoreError> {
        self.check_available()?;
        Ok(self.proposals.lock().expect("store poisoned").clone())
    }
}
