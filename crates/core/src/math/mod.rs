//! # Math
//!
//! Overflow-checked arithmetic and the constant-product quoting functions.

pub mod amm;
pub mod safe;

pub use amm::*;
pub use safe::*;

use crate::constants::UNIT;
use crate::errors::{CoreError, CoreResult};

/// Convert base units into a decimal token amount for display.
pub fn to_ui_amount(units: u64) -> f64 {
    units as f64 / UNIT as f64
}

/// Convert a (possibly supply-sized) base-unit figure into a decimal token
/// amount for display.
pub fn to_ui_amount_u128(units: u128) -> f64 {
    units as f64 / UNIT as f64
}

/// Parse a decimal token amount from the wire into base units.
///
/// Rejects non-finite, negative and out-of-range values.
pub fn from_ui_amount(amount: f64) -> CoreResult<u64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(CoreError::InvalidAmount);
    }
    let units = (amount * UNIT as f64).round();
    if units > u64::MAX as f64 {
        return Err(CoreError::ConversionError);
    }
    Ok(units as u64)
}

/// Parse a decimal token amount into a supply-sized base-unit figure.
pub fn from_ui_amount_u128(amount: f64) -> CoreResult<u128> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(CoreError::InvalidAmount);
    }
    let units = (amount * UNIT as f64).round();
    if units > u128::MAX as f64 {
        return Err(CoreError::ConversionError);
    }
    Ok(units as u128)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_amount_round_trip() {
        assert_eq!(from_ui_amount(1000.0).unwrap(), 1_000 * UNIT);
        assert_eq!(to_ui_amount(1_000 * UNIT), 1000.0);
        assert_eq!(from_ui_amount(0.5).unwrap(), UNIT / 2);
    }

    #[test]
    fn test_ui_amount_rejects_bad_input() {
        assert!(from_ui_amount(-1.0).is_err());
        assert!(from_ui_amount(f64::NAN).is_err());
        assert!(from_ui_amount(f64::INFINITY).is_err());
    }
}
