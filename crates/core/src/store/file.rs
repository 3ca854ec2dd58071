//! JSON file store, the local-storage analogue.

use std::fs;
use std::path::{Path, PathBuf};

use crate::governance::Proposal;
use crate::store::{ProposalStore, StoreError};

/// Persists the proposal set as pretty-printed JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProposalStore for FileStore {
    fn save(&self, proposals: &[Proposal]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(proposals)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn load(&self) -> Result<Vec<Proposal>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::governance::{GovernanceLedger, GovernanceParams};
    use crate::ledger::{Address, BalanceLedger};
    use crate::pool::{LiquidityPool, PoolParams};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("nothing-store-{}-{}.json", std::process::id(), name))
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let store = FileStore::new(temp_path("missing"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_round_trip() {
        let path = temp_path("round-trip");
        let store = FileStore::new(&path);

        let mut governance = GovernanceLedger::new(GovernanceParams::default());
        let mut ledger = BalanceLedger::new();
        let pool = LiquidityPool::new(PoolParams::default()).unwrap();
        let proposer = Address::sample();
        ledger.seed(proposer.clone(), u64::MAX / 4);
        let id = governance
            .create_proposal(
                &ledger,
                pool.supply(),
                &proposer,
                "Raise",
                "More",
                governance.params().supply_floor * 2,
                1_700_000_000,
            )
            .unwrap();

        store.save(governance.proposals()).unwrap();
        let restored = store.load().unwrap();

        assert_eq!(restored.len(), 1);
        assert_eq!(restored[0].id, id);
        assert_eq!(restored[0].title, "Raise");
        assert_eq!(restored[0].votes_for, (u64::MAX / 4) as u128);

        let _ = fs::remove_file(path);
    }
}
