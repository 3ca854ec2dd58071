//! Periodic proposal evaluation.
//!
//! The node-side replacement for the original's re-evaluation timer: on a
//! fixed interval, finalize every proposal whose terminal condition has been
//! reached, execute the ones that passed, and persist the result.

use std::sync::Arc;
use std::time::Duration;

use tokio::time;

use nothing_core::governance::ProposalStatus;
use nothing_core::store::StoreMode;

use crate::error::NodeError;
use crate::state::AppState;

pub struct Evaluator {
    state: Arc<AppState>,
    interval: Duration,
}

impl Evaluator {
    pub fn new(state: Arc<AppState>, interval: Duration) -> Self {
        Self { state, interval }
    }

    /// Main evaluation loop. Individual iteration failures are logged and
    /// the loop keeps running.
    pub async fn run(self) {
        let mut interval_timer = time::interval(self.interval);
        let mut iteration = 0u64;

        loop {
            interval_timer.tick().await;
            iteration += 1;

            match self.evaluate_once().await {
                Ok(0) => {
                    tracing::debug!(iteration, "no proposals due");
                }
                Ok(finalized) => {
                    tracing::info!(iteration, finalized, "finalized proposals");
                }
                Err(e) => {
                    tracing::error!(iteration, error = %e, "evaluation iteration failed");
                }
            }
        }
    }

    /// One evaluation pass; returns how many proposals reached a terminal
    /// state.
    pub async fn evaluate_once(&self) -> Result<usize, NodeError> {
        let now = chrono::Utc::now().timestamp();

        let mut pool = self.state.pool.write().await;
        let mut governance = self.state.governance.write().await;

        let supply = *pool.supply();
        let transitions = governance.finalize_due(&supply, now)?;

        for (id, status) in &transitions {
            if *status == ProposalStatus::Passed {
                governance.execute(&mut pool, *id)?;
            }
        }

        if !transitions.is_empty() {
            match self.state.save_proposals(&governance)? {
                StoreMode::Primary => {}
                StoreMode::Degraded => {
                    tracing::warn!("proposal store degraded: wrote to fallback tier only");
                }
            }
        }

        Ok(transitions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NodeConfig;
    use nothing_core::constants::{tokens, DEFAULT_VOTING_PERIOD_SECS};
    use nothing_core::ledger::Address;

    fn test_config(name: &str) -> NodeConfig {
        let mut config = NodeConfig::default();
        config.store_path = std::env::temp_dir()
            .join(format!("nothing-eval-{}-{}.json", std::process::id(), name))
            .to_string_lossy()
            .into_owned();
        config
    }

    #[tokio::test]
    async fn test_evaluates_and_executes_due_proposals() {
        let config = test_config("executes");
        let (state, _) = AppState::from_config(&config).unwrap();

        // A whale proposer whose implicit vote clears the early-pass bar.
        let whale = Address::parse("0x742d35Cc6634C0532925a3b844Bc454e4438f44e").unwrap();
        state
            .ledger
            .write()
            .await
            .seed(whale.clone(), tokens(7_600_000_000));

        let proposed_supply;
        {
            let pool = state.pool.read().await;
            let mut governance = state.governance.write().await;
            let ledger = state.ledger.read().await;
            proposed_supply = governance.params().supply_floor * 2;
            let created_at = chrono::Utc::now().timestamp() - DEFAULT_VOTING_PERIOD_SECS - 1;
            governance
                .create_proposal(
                    &ledger,
                    pool.supply(),
                    &whale,
                    "Whale cap raise",
                    "Backed by 76% of supply",
                    proposed_supply,
                    created_at,
                )
                .unwrap();
        }

        let evaluator = Evaluator::new(state.clone(), Duration::from_secs(1));
        let finalized = evaluator.evaluate_once().await.unwrap();
        assert_eq!(finalized, 1);

        let pool = state.pool.read().await;
        assert_eq!(pool.supply().max(), proposed_supply);
        let governance = state.governance.read().await;
        assert!(governance.proposal(1).unwrap().executed);

        let _ = std::fs::remove_file(&config.store_path);
    }

    #[tokio::test]
    async fn test_idle_pass_touches_nothing() {
        let config = test_config("idle");
        let (state, _) = AppState::from_config(&config).unwrap();
        let evaluator = Evaluator::new(state.clone(), Duration::from_secs(1));
        assert_eq!(evaluator.evaluate_once().await.unwrap(), 0);
    }
}
