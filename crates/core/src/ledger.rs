//! # Balance Ledger
//!
//! Off-pool token balances keyed by wallet address, with cumulative burn
//! tracking. The pool and governance components validate against and settle
//! into this ledger.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, CoreResult};
use crate::math::safe::{safe_add_u64, safe_sub_u64};

/// A 0x-prefixed, 40-hex-digit wallet address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// Parse and validate an address string.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let hex = s
            .strip_prefix("0x")
            .ok_or_else(|| CoreError::InvalidAddress(s.to_string()))?;
        if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CoreError::InvalidAddress(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for display: `0x9b71...5489`.
    pub fn shorten(&self) -> String {
        format!("{}...{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }

    /// A fixed well-formed address for tests.
    #[doc(hidden)]
    pub fn sample() -> Self {
        Self("0x9b710EAa56B1a7D45f12C9c642D8CeE766405489".to_string())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Address {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::parse(s)
    }
}

/// In-memory balance ledger.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct BalanceLedger {
    balances: HashMap<Address, u64>,
    burned: HashMap<Address, u64>,
}

impl BalanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current balance; unknown addresses hold zero.
    pub fn balance(&self, holder: &Address) -> u64 {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    /// Cumulative amount this holder has burned.
    pub fn burned(&self, holder: &Address) -> u64 {
        self.burned.get(holder).copied().unwrap_or(0)
    }

    /// Number of addresses with a non-zero balance.
    pub fn holders(&self) -> usize {
        self.balances.values().filter(|b| **b > 0).count()
    }

    /// Seed an initial balance, replacing any existing entry.
    pub fn seed(&mut self, holder: Address, amount: u64) {
        self.balances.insert(holder, amount);
    }

    /// Add to a holder's balance, returning the new balance.
    pub fn credit(&mut self, holder: &Address, amount: u64) -> CoreResult<u64> {
        let updated = safe_add_u64(self.balance(holder), amount)?;
        self.balances.insert(holder.clone(), updated);
        Ok(updated)
    }

    /// Remove from a holder's balance, returning the new balance. Rejects
    /// without mutating when funds are short.
    pub fn debit(&mut self, holder: &Address, amount: u64) -> CoreResult<u64> {
        let available = self.balance(holder);
        if available < amount {
            return Err(CoreError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        let updated = safe_sub_u64(available, amount)?;
        self.balances.insert(holder.clone(), updated);
        Ok(updated)
    }

    /// Debit and record a burn, returning the new balance.
    pub fn burn(&mut self, holder: &Address, amount: u64) -> CoreResult<u64> {
        let updated = self.debit(holder, amount)?;
        let total = safe_add_u64(self.burned(holder), amount)?;
        self.burned.insert(holder.clone(), total);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_validation() {
        assert!(Address::parse("0x9b710EAa56B1a7D45f12C9c642D8CeE766405489").is_ok());
        assert!(Address::parse("9b710EAa56B1a7D45f12C9c642D8CeE766405489").is_err());
        assert!(Address::parse("0x9b71").is_err());
        assert!(Address::parse("0xZZ710EAa56B1a7D45f12C9c642D8CeE766405489").is_err());
    }

    #[test]
    fn test_shorten() {
        assert_eq!(Address::sample().shorten(), "0x9b71...5489");
    }

    #[test]
    fn test_credit_and_debit() {
        let mut ledger = BalanceLedger::new();
        let holder = Address::sample();

        assert_eq!(ledger.balance(&holder), 0);
        assert_eq!(ledger.credit(&holder, 100).unwrap(), 100);
        assert_eq!(ledger.debit(&holder, 40).unwrap(), 60);

        // Short debit rejects and leaves the balance untouched
        let err = ledger.debit(&holder, 61).unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientBalance {
                needed: 61,
                available: 60
            }
        );
        assert_eq!(ledger.balance(&holder), 60);
    }

    #[test]
    fn test_burn_tracks_total() {
        let mut ledger = BalanceLedger::new();
        let holder = Address::sample();
        ledger.seed(holder.clone(), 100);

        assert_eq!(ledger.burn(&holder, 30).unwrap(), 70);
        assert_eq!(ledger.burn(&holder, 20).unwrap(), 50);
        assert_eq!(ledger.burned(&holder), 50);
    }

    #[test]
    fn test_holders_counts_nonzero() {
        let mut ledger = BalanceLedger::new();
        let a = Address::sample();
        let b = Address::parse("0x742d35Cc6634C0532925a3b844Bc454e4438f44e").unwrap();
        ledger.seed(a.clone(), 10);
        ledger.seed(b, 5);
        assert_eq!(ledger.holders(), 2);

        ledger.debit(&a, 10).unwrap();
        assert_eq!(ledger.holders(), 1);
    }
}
