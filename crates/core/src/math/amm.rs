//! # Constant-Product Quoting
//!
//! Pure pricing functions for the two-asset pool. The post-swap reserve is
//! rounded up (against the trader) so the reserve product never decreases,
//! even for fee-free dust trades; fee and impact deductions round down.

use crate::constants::{
    BPS_DENOMINATOR, MAX_SWAP_OUTPUT_BPS, PRICE_IMPACT_THRESHOLD_BPS,
};
use crate::errors::{CoreError, CoreResult};
use crate::math::safe::{
    bps_of_u64, div_ceil_u128, mul_div_u64, safe_sub_u64, sqrt_u128, Rounding,
};

/// Priced breakdown of a prospective swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapQuote {
    /// Output after fee and impact deductions.
    pub amount_out: u64,
    /// Raw constant-product output before deductions.
    pub amount_out_raw: u64,
    /// Fee withheld, in output units.
    pub fee_amount: u64,
    /// Impact deduction applied, in basis points of the output.
    pub impact_bps: u64,
}

/// Quote a swap of `amount_in` base asset against the pool reserves.
pub fn quote_constant_product(
    base_reserve: u64,
    token_reserve: u64,
    amount_in: u64,
    fee_bps: u64,
    impact_factor_bps: u64,
) -> CoreResult<SwapQuote> {
    if amount_in == 0 {
        return Err(CoreError::InvalidAmount);
    }
    if base_reserve == 0 || token_reserve == 0 {
        return Err(CoreError::InsufficientLiquidity);
    }

    // x * y = k, solved for the post-swap token reserve
    let k = base_reserve as u128 * token_reserve as u128;
    let new_base = base_reserve as u128 + amount_in as u128;
    let new_token = div_ceil_u128(k, new_base)?;
    let amount_out_raw = (token_reserve as u128 - new_token) as u64;

    let fee_amount = bps_of_u64(amount_out_raw, fee_bps)?;
    let after_fee = safe_sub_u64(amount_out_raw, fee_amount)?;

    // Impact penalty for trades at or above 1% of the input reserve,
    // scaling linearly with trade size.
    let trade_bps = mul_div_u64(amount_in, BPS_DENOMINATOR, base_reserve, Rounding::Down)?;
    let impact_bps = if trade_bps >= PRICE_IMPACT_THRESHOLD_BPS {
        mul_div_u64(trade_bps, impact_factor_bps, BPS_DENOMINATOR, Rounding::Down)?
    } else {
        0
    };
    if impact_bps >= BPS_DENOMINATOR {
        return Err(CoreError::InsufficientLiquidity);
    }
    let impact_amount = bps_of_u64(after_fee, impact_bps)?;
    let amount_out = safe_sub_u64(after_fee, impact_amount)?;

    if amount_out > bps_of_u64(token_reserve, MAX_SWAP_OUTPUT_BPS)? {
        return Err(CoreError::InsufficientLiquidity);
    }

    Ok(SwapQuote {
        amount_out,
        amount_out_raw,
        fee_amount,
        impact_bps,
    })
}

/// Token amount required to match a base-asset deposit at the current
/// reserve ratio.
pub fn quote_matching_deposit(
    base_reserve: u64,
    token_reserve: u64,
    amount_base: u64,
) -> CoreResult<u64> {
    if amount_base == 0 {
        return Err(CoreError::InvalidAmount);
    }
    if base_reserve == 0 {
        return Err(CoreError::InsufficientLiquidity);
    }
    mul_div_u64(amount_base, token_reserve, base_reserve, Rounding::Down)
}

/// Liquidity units issued for a paired deposit: the geometric mean of the
/// two contributed amounts.
pub fn liquidity_units(amount_base: u64, amount_token: u64) -> u128 {
    sqrt_u128(amount_base as u128 * amount_token as u128)
}

/// Spot price of the token in base-asset terms.
pub fn spot_price(base_reserve: u64, token_reserve: u64) -> f64 {
    if token_reserve == 0 {
        return 0.0;
    }
    base_reserve as f64 / token_reserve as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_PRICE_IMPACT_FACTOR_BPS, DEFAULT_SWAP_FEE_BPS, UNIT};

    const BASE: u64 = 5_000 * UNIT;
    const TOKEN: u64 = 1_000_000 * UNIT;

    fn quote(amount_in: u64) -> CoreResult<SwapQuote> {
        quote_constant_product(
            BASE,
            TOKEN,
            amount_in,
            DEFAULT_SWAP_FEE_BPS,
            DEFAULT_PRICE_IMPACT_FACTOR_BPS,
        )
    }

    #[test]
    fn test_reference_swap() {
        // Reserves (5000, 1,000,000), swap in 50 base tokens. Reference
        // computation in base units:
        //   k         = 5e12 * 1e15
        //   new_token = ceil(k / 5.05e12)   = 990_099_009_900_991
        //   raw       = 1e15 - new_token    =   9_900_990_099_009
        //   fee       = floor(raw * 30/1e4) =      29_702_970_297
        //   trade     = 5e10 * 1e4 / 5e12   = 100 bps -> impact branch
        //   impact    = 100 * 200 / 1e4     = 2 bps
        //   out       = (raw - fee) - floor((raw - fee) * 2/1e4)
        let q = quote(50 * UNIT).unwrap();
        assert_eq!(q.amount_out_raw, 9_900_990_099_009);
        assert_eq!(q.fee_amount, 29_702_970_297);
        assert_eq!(q.impact_bps, 2);
        assert_eq!(q.amount_out, 9_869_312_871_287);

        // ~9869.31 whole tokens
        assert_eq!(q.amount_out / UNIT, 9_869);
    }

    #[test]
    fn test_rejects_zero_input() {
        assert_eq!(quote(0), Err(CoreError::InvalidAmount));
    }

    #[test]
    fn test_impact_threshold_is_inclusive() {
        // 0.99% of the reserve: no impact deduction.
        let below = quote(BASE / 10_000 * 99).unwrap();
        assert_eq!(below.impact_bps, 0);

        // Exactly 1%: the impact branch applies.
        let at = quote(BASE / 100).unwrap();
        assert_eq!(at.impact_bps, 2);
    }

    #[test]
    fn test_adjusted_output_below_raw() {
        let q = quote(10 * UNIT).unwrap();
        assert!(q.amount_out < q.amount_out_raw);
        // No impact below 1%, so the only deduction is the fee.
        assert_eq!(q.impact_bps, 0);
        assert_eq!(q.amount_out, q.amount_out_raw - q.fee_amount);
    }

    #[test]
    fn test_output_guard() {
        // Swapping in three times the base reserve would claim ~75% of the
        // token reserve.
        assert_eq!(quote(3 * BASE), Err(CoreError::InsufficientLiquidity));
    }

    #[test]
    fn test_quote_monotonic_on_doubling_ladder() {
        let mut last = 0u64;
        let mut amount_in = UNIT;
        for _ in 0..9 {
            let q = quote(amount_in).unwrap();
            assert!(q.amount_out > last, "output shrank at input {}", amount_in);
            last = q.amount_out;
            amount_in *= 2;
        }
    }

    #[test]
    fn test_matching_deposit_follows_ratio() {
        // 200 NTH per AVAX at the initial reserves.
        assert_eq!(
            quote_matching_deposit(BASE, TOKEN, 10 * UNIT).unwrap(),
            2_000 * UNIT
        );
        assert_eq!(
            quote_matching_deposit(BASE, TOKEN, 0),
            Err(CoreError::InvalidAmount)
        );
    }

    #[test]
    fn test_liquidity_units_geometric_mean() {
        assert_eq!(liquidity_units(4, 9), 6);
        assert_eq!(liquidity_units(10 * UNIT, 2_000 * UNIT), 141_421_356_237);
    }

    #[test]
    fn test_spot_price() {
        assert_eq!(spot_price(BASE, TOKEN), 0.005);
        assert_eq!(spot_price(BASE, 0), 0.0);
    }
}
