//! # Protocol Constants
//!
//! Fundamental constants for the Nothing token system:
//! - Fixed-point scale and basis-point denominators
//! - Pool fee and price-impact parameters
//! - Governance thresholds and windows
//! - Initial supply figures

// ============================================================================
// Fixed-Point Representation
// ============================================================================

/// Decimal places carried by every token amount.
pub const TOKEN_DECIMALS: u32 = 9;

/// Base units per whole token: 10^9.
pub const UNIT: u64 = 1_000_000_000;

/// Basis points denominator (10,000 = 100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

// ============================================================================
// Pool Parameters
// ============================================================================

/// Swap fee in basis points (0.3%).
pub const DEFAULT_SWAP_FEE_BPS: u64 = 30;

/// Price impact factor in basis points (0.02), applied proportionally to
/// trade size once the impact threshold is crossed.
pub const DEFAULT_PRICE_IMPACT_FACTOR_BPS: u64 = 200;

/// Trades at or above this share of the input reserve (1%) take the
/// price-impact deduction.
pub const PRICE_IMPACT_THRESHOLD_BPS: u64 = 100;

/// A single swap may not drain more than this share of the output reserve.
pub const MAX_SWAP_OUTPUT_BPS: u64 = 5_000;

/// Initial base-asset (AVAX) reserve, in whole tokens.
pub const DEFAULT_BASE_RESERVE_TOKENS: u64 = 5_000;

/// Initial NTH reserve, in whole tokens.
pub const DEFAULT_TOKEN_RESERVE_TOKENS: u64 = 1_000_000;

// ============================================================================
// Supply
// ============================================================================

/// Hard floor for the governed max supply, in whole tokens.
pub const SUPPLY_FLOOR_TOKENS: u64 = 10_000_000_000;

/// Default max supply, in whole tokens.
pub const DEFAULT_MAX_SUPPLY_TOKENS: u64 = 10_000_000_000;

/// Default circulating supply (10% of max), in whole tokens.
pub const DEFAULT_CIRCULATING_TOKENS: u64 = 1_000_000_000;

// ============================================================================
// Governance Parameters
// ============================================================================

/// Participation (for + against) required for a vote to bind, as a share
/// of max supply (10%).
pub const DEFAULT_QUORUM_BPS: u64 = 1_000;

/// Minimum holding required to open a proposal, as a share of max supply
/// (0.5%).
pub const DEFAULT_MIN_PROPOSER_BPS: u64 = 50;

/// Voting window, in seconds (7 days).
pub const DEFAULT_VOTING_PERIOD_SECS: i64 = 7 * 24 * 60 * 60;

/// Early-pass threshold: "for" votes exceeding this share of max supply
/// (75%) can close a proposal before its window ends.
pub const EARLY_PASS_SUPPLY_BPS: u64 = 7_500;

/// Early pass additionally requires "for" to outweigh "against" by this
/// multiple.
pub const EARLY_PASS_DOMINANCE: u128 = 5;

/// Convert a whole-token figure into base units.
pub const fn tokens(amount: u64) -> u64 {
    amount * UNIT
}

/// Convert a whole-token figure into base units, widening for supply math.
pub const fn tokens_u128(amount: u64) -> u128 {
    amount as u128 * UNIT as u128
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_matches_decimals() {
        assert_eq!(UNIT, 10u64.pow(TOKEN_DECIMALS));
    }

    #[test]
    fn test_supply_floor_needs_widening() {
        // The supply floor does not fit comfortably in u64 base units,
        // which is why supply figures are u128.
        assert!(tokens_u128(SUPPLY_FLOOR_TOKENS) > u64::MAX as u128 / 2);
    }
}
