//! # Safe Math Operations
//!
//! Overflow-checked arithmetic. Amounts are u64 base units; supply figures
//! and intermediates widen to u128, so every u64 mul-div is exact.

use crate::errors::{CoreError, CoreResult};

/// Rounding direction for mul-div operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Down,
    Up,
}

/// Macro to generate safe arithmetic functions
macro_rules! safe_arith {
    // Binary operations with checked methods
    ($fn_name:ident, $type:ty, $checked_method:ident, $error:expr) => {
        /// Safe $fn_name with overflow/underflow check
        pub fn $fn_name(a: $type, b: $type) -> CoreResult<$type> {
            a.$checked_method(b).ok_or($error)
        }
    };

    // Division operations with zero check
    (div, $fn_name:ident, $type:ty) => {
        /// Safe division with zero check
        pub fn $fn_name(a: $type, b: $type) -> CoreResult<$type> {
            if b == 0 {
                return Err(CoreError::DivisionByZero);
            }
            Ok(a / b)
        }
    };
}

safe_arith!(safe_add_u64, u64, checked_add, CoreError::MathOverflow);
safe_arith!(safe_sub_u64, u64, checked_sub, CoreError::MathUnderflow);
safe_arith!(safe_mul_u64, u64, checked_mul, CoreError::MathOverflow);
safe_arith!(div, safe_div_u64, u64);

safe_arith!(safe_add_u128, u128, checked_add, CoreError::MathOverflow);
safe_arith!(safe_sub_u128, u128, checked_sub, CoreError::MathUnderflow);
safe_arith!(safe_mul_u128, u128, checked_mul, CoreError::MathOverflow);
safe_arith!(div, safe_div_u128, u128);

/// Mul-div for u64 operands with a u128 intermediate, which cannot
/// overflow: (2^64 - 1)^2 < 2^128.
pub fn mul_div_u64(a: u64, b: u64, denominator: u64, rounding: Rounding) -> CoreResult<u64> {
    if denominator == 0 {
        return Err(CoreError::DivisionByZero);
    }
    let numerator = a as u128 * b as u128;
    let denominator = denominator as u128;
    let mut quotient = numerator / denominator;
    if rounding == Rounding::Up && numerator % denominator != 0 {
        quotient += 1;
    }
    quotient
        .try_into()
        .map_err(|_| CoreError::ConversionError)
}

/// Mul-div for u128 operands; errors when the product overflows.
pub fn mul_div_u128(a: u128, b: u128, denominator: u128, rounding: Rounding) -> CoreResult<u128> {
    if denominator == 0 {
        return Err(CoreError::DivisionByZero);
    }
    let numerator = a.checked_mul(b).ok_or(CoreError::MathOverflow)?;
    let mut quotient = numerator / denominator;
    if rounding == Rounding::Up && numerator % denominator != 0 {
        quotient = quotient.checked_add(1).ok_or(CoreError::MathOverflow)?;
    }
    Ok(quotient)
}

/// Division with remainder-aware ceiling.
pub fn div_ceil_u128(numerator: u128, denominator: u128) -> CoreResult<u128> {
    if denominator == 0 {
        return Err(CoreError::DivisionByZero);
    }
    let quotient = numerator / denominator;
    if numerator % denominator != 0 {
        quotient.checked_add(1).ok_or(CoreError::MathOverflow)
    } else {
        Ok(quotient)
    }
}

/// Take a basis-point share of a u64 amount, rounding down.
pub fn bps_of_u64(amount: u64, bps: u64) -> CoreResult<u64> {
    mul_div_u64(amount, bps, crate::constants::BPS_DENOMINATOR, Rounding::Down)
}

/// Take a basis-point share of a u128 figure, rounding down.
pub fn bps_of_u128(amount: u128, bps: u64) -> CoreResult<u128> {
    mul_div_u128(
        amount,
        bps as u128,
        crate::constants::BPS_DENOMINATOR as u128,
        Rounding::Down,
    )
}

/// Integer square root for u128
pub fn sqrt_u128(n: u128) -> u128 {
    if n == 0 {
        return 0;
    }

    // Newton's method for integer square root
    let mut x = n;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}
