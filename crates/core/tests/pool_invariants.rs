//! # Pool Invariant Tests
//!
//! Property tests over the constant-product pool: the reserve product can
//! only grow, quoting is monotone within an impact regime, and deductions
//! always leave the trader short of the raw output.

use proptest::prelude::*;

use nothing_core::ledger::{Address, BalanceLedger};
use nothing_core::pool::{LiquidityPool, PoolParams};
use nothing_core::UNIT;

fn pool() -> LiquidityPool {
    LiquidityPool::new(PoolParams::default()).unwrap()
}

// Swap sizes from dust up to 2% of the initial base reserve; the pool only
// grows during a run, so every generated swap stays accepted.
fn swap_amount() -> impl Strategy<Value = u64> {
    1_000_000u64..=100 * UNIT
}

proptest! {
    #[test]
    fn product_never_decreases_across_swaps(amounts in prop::collection::vec(swap_amount(), 1..20)) {
        let mut pool = pool();
        let mut ledger = BalanceLedger::new();
        let buyer = Address::sample();
        let mut k = pool.constant_product();

        for amount_in in amounts {
            pool.swap(&mut ledger, &buyer, amount_in).unwrap();
            let k_after = pool.constant_product();
            prop_assert!(k_after >= k, "product shrank: {} -> {}", k, k_after);
            k = k_after;
        }
    }

    #[test]
    fn adjusted_output_strictly_below_raw(amount_in in swap_amount()) {
        let quote = pool().quote_swap(amount_in).unwrap();
        // Outputs here are large enough that the floored fee is non-zero.
        prop_assert!(quote.fee_amount > 0);
        prop_assert!(quote.amount_out < quote.amount_out_raw);
    }

    #[test]
    fn quote_monotone_within_impact_regime(
        amount_in in swap_amount(),
        delta in 1u64..=10 * UNIT,
    ) {
        let pool = pool();
        let smaller = pool.quote_swap(amount_in).unwrap();
        let larger = pool.quote_swap(amount_in + delta).unwrap();

        // Crossing an impact step trades a discontinuous penalty against a
        // marginal output gain, so monotonicity is only promised within a
        // regime.
        if smaller.impact_bps == larger.impact_bps {
            prop_assert!(larger.amount_out >= smaller.amount_out);
        }
    }

    #[test]
    fn deposits_grow_the_product_and_issue_units(amount_base in UNIT..=1_000 * UNIT) {
        let mut pool = pool();
        let mut ledger = BalanceLedger::new();
        let provider = Address::sample();
        ledger.seed(provider.clone(), u64::MAX / 2);

        let k_before = pool.constant_product();
        let receipt = pool.add_liquidity(&mut ledger, &provider, amount_base).unwrap();

        prop_assert!(pool.constant_product() > k_before);
        prop_assert!(receipt.units_issued > 0);
        prop_assert_eq!(
            pool.position(&provider).unwrap().units,
            receipt.units_issued
        );
    }
}
