//! # Event Seam
//!
//! Explicit observer interface between the pool/governance components and
//! their collaborators (UI, logging, indexing). Components publish after a
//! mutation has fully succeeded; sinks must not fail.

use crate::governance::ProposalStatus;
use crate::ledger::Address;

/// Domain events published by the pool and governance components.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    LiquidityAdded {
        provider: Address,
        base_amount: u64,
        token_amount: u64,
        units_issued: u128,
    },
    Swapped {
        buyer: Address,
        base_in: u64,
        token_out: u64,
        new_price: f64,
    },
    TokensBurned {
        holder: Address,
        amount: u64,
    },
    MaxSupplyChanged {
        previous: u128,
        new: u128,
    },
    ProposalCreated {
        id: u64,
        proposer: Address,
    },
    VoteCast {
        id: u64,
        voter: Address,
        support: bool,
        weight: u64,
    },
    ProposalFinalized {
        id: u64,
        status: ProposalStatus,
    },
    ProposalExecuted {
        id: u64,
        new_supply: u128,
    },
}

/// Observer for domain events.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: &Event);
}

/// Sink that discards everything; the default when no observer is wired.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&self, _event: &Event) {}
}

/// Sink that records events in memory, for tests and diagnostics.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: std::sync::Mutex<Vec<Event>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().expect("event sink poisoned").clone()
    }
}

impl EventSink for MemorySink {
    fn publish(&self, event: &Event) {
        self.events
            .lock()
            .expect("event sink poisoned")
            .push(event.clone());
    }
}
