//! Shared node state.
//!
//! Each core component sits behind its own lock, since concurrent API
//! requests would otherwise race on reserves and tallies. Lock order is
//! always pool → governance → ledger.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::RwLock;

use nothing_core::constants::tokens;
use nothing_core::events::{Event, EventSink};
use nothing_core::governance::GovernanceLedger;
use nothing_core::ledger::{Address, BalanceLedger};
use nothing_core::pool::LiquidityPool;
use nothing_core::store::{FileStore, MemoryStore, StoreError, StoreMode, TieredStore};

use crate::config::NodeConfig;

/// Simulated connection cap, as in the original mock server.
const MAX_CONNECTED: u32 = 500;

/// Event sink that forwards domain events to the log.
struct LogSink;

impl EventSink for LogSink {
    fn publish(&self, event: &Event) {
        tracing::info!(?event, "domain event");
    }
}

/// State shared by the API handlers and the evaluator.
pub struct AppState {
    pub pool: RwLock<LiquidityPool>,
    pub governance: RwLock<GovernanceLedger>,
    pub ledger: RwLock<BalanceLedger>,
    store: TieredStore<FileStore, MemoryStore>,
    /// Wallet used when requests omit an address.
    pub wallet: Address,
    connected: AtomicU32,
}

impl AppState {
    /// Build state from config, restoring persisted proposals. Returns the
    /// store mode of the restore so startup can surface degraded loads.
    pub fn from_config(config: &NodeConfig) -> Result<(Arc<Self>, StoreMode)> {
        let wallet = Address::parse(&config.default_wallet)
            .context("invalid default wallet address")?;
        let events: Arc<dyn EventSink> = Arc::new(LogSink);

        let pool = LiquidityPool::with_events(config.pool_params(), events.clone())
            .context("invalid pool parameters")?;

        let store = TieredStore::new(FileStore::new(&config.store_path), MemoryStore::new());
        let (proposals, mode) = store.load().context("failed to load proposal store")?;
        let governance = GovernanceLedger::from_proposals(
            config.governance_params(),
            proposals,
            events,
        );

        let mut ledger = BalanceLedger::new();
        ledger.seed(wallet.clone(), tokens(config.default_wallet_balance_tokens));

        let state = Arc::new(Self {
            pool: RwLock::new(pool),
            governance: RwLock::new(governance),
            ledger: RwLock::new(ledger),
            store,
            wallet,
            connected: AtomicU32::new(0),
        });
        Ok((state, mode))
    }

    /// Persist the proposal set. Takes the ledger by reference so callers
    /// already holding the governance lock do not deadlock.
    pub fn save_proposals(
        &self,
        governance: &GovernanceLedger,
    ) -> Result<StoreMode, StoreError> {
        self.store.save(governance.proposals())
    }

    /// Simulated connection counter: each sampled request has a one-in-ten
    /// chance of adding a user, capped as in the original server.
    pub fn simulate_connection(&self) -> u32 {
        if rand::random::<f64>() > 0.9 {
            let _ = self
                .connected
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                    (current < MAX_CONNECTED).then_some(current + 1)
                });
        }
        self.connected.load(Ordering::SeqCst)
    }

    pub fn connected(&self) -> u32 {
        self.connected.load(Ordering::SeqCst)
    }
}
