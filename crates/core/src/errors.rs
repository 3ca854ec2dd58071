//! # Core Error Types
//!
//! Every fallible operation in this crate rejects with a [`CoreError`]
//! before mutating any state.

use thiserror::Error;

/// Core errors shared by the pool, ledger and governance components.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    // ========================================================================
    // Math Errors
    // ========================================================================
    #[error("Math overflow")]
    MathOverflow,

    #[error("Math underflow")]
    MathUnderflow,

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Conversion error")]
    ConversionError,

    // ========================================================================
    // Pool and Ledger Errors
    // ========================================================================
    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Insufficient balance: need {needed} base units, have {available}")]
    InsufficientBalance { needed: u64, available: u64 },

    #[error("Swap too large for current liquidity")]
    InsufficientLiquidity,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid pool parameter: {0}")]
    InvalidPoolParameter(&'static str),

    // ========================================================================
    // Governance Errors
    // ========================================================================
    #[error("Supply must be at least 10,000,000,000 tokens")]
    SupplyBelowFloor,

    #[error("Invalid proposal: {0}")]
    InvalidProposal(&'static str),

    #[error("Proposal {0} not found")]
    ProposalNotFound(u64),

    #[error("Balance below the proposal threshold: need {needed} base units, have {available}")]
    ProposalThresholdNotMet { needed: u128, available: u64 },

    #[error("Voting period has ended for this proposal")]
    VotingClosed,

    #[error("Already voted on this proposal")]
    AlreadyVoted,

    #[error("No voting power: a non-zero token balance is required")]
    NoVotingPower,

    #[error("Proposal {0} has not passed")]
    ProposalNotPassed(u64),
}

/// Result type using core errors
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::InsufficientBalance {
            needed: 100,
            available: 7,
        };
        assert_eq!(
            format!("{}", err),
            "Insufficient balance: need 100 base units, have 7"
        );

        let err = CoreError::ProposalNotFound(42);
        assert_eq!(format!("{}", err), "Proposal 42 not found");
    }
}
