//! # Liquidity Pool
//!
//! Constant-product pool holding the AVAX/NTH reserves, per-provider
//! liquidity positions and the governed supply figures. All business
//! validation for pool operations lives here; callers (HTTP handlers, the
//! evaluator) only translate and relay.
//!
//! Invariant: `base_reserve * token_reserve` never decreases. There is no
//! withdrawal path, swaps round the post-swap reserve against the trader,
//! and deposits only grow both sides.

use std::collections::HashMap;
use std::sync::Arc;

use crate::constants::{
    tokens, tokens_u128, DEFAULT_BASE_RESERVE_TOKENS, DEFAULT_CIRCULATING_TOKENS,
    DEFAULT_MAX_SUPPLY_TOKENS, DEFAULT_PRICE_IMPACT_FACTOR_BPS, DEFAULT_SWAP_FEE_BPS,
    DEFAULT_TOKEN_RESERVE_TOKENS, SUPPLY_FLOOR_TOKENS, BPS_DENOMINATOR,
};
use crate::errors::{CoreError, CoreResult};
use crate::events::{Event, EventSink, NullSink};
use crate::ledger::{Address, BalanceLedger};
use crate::math::amm::{
    liquidity_units, quote_constant_product, quote_matching_deposit, spot_price, SwapQuote,
};
use crate::math::safe::{safe_add_u128, safe_add_u64, safe_sub_u128, safe_sub_u64};

/// Supply accounting governed alongside the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSupply {
    max: u128,
    circulating: u128,
    burned: u128,
}

impl TokenSupply {
    pub fn new(max: u128, circulating: u128) -> Self {
        Self {
            max,
            circulating,
            burned: 0,
        }
    }

    pub fn max(&self) -> u128 {
        self.max
    }

    pub fn circulating(&self) -> u128 {
        self.circulating
    }

    pub fn burned(&self) -> u128 {
        self.burned
    }
}

/// One provider's recorded contribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiquidityPosition {
    pub base_contributed: u64,
    pub token_contributed: u64,
    pub units: u128,
}

/// Receipt for a completed liquidity deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidityReceipt {
    pub token_amount: u64,
    pub units_issued: u128,
}

/// Construction parameters, in base units.
#[derive(Debug, Clone, Copy)]
pub struct PoolParams {
    pub base_reserve: u64,
    pub token_reserve: u64,
    pub swap_fee_bps: u64,
    pub price_impact_factor_bps: u64,
    pub max_supply: u128,
    pub circulating_supply: u128,
}

impl Default for PoolParams {
    fn default() -> Self {
        Self {
            base_reserve: tokens(DEFAULT_BASE_RESERVE_TOKENS),
            token_reserve: tokens(DEFAULT_TOKEN_RESERVE_TOKENS),
            swap_fee_bps: DEFAULT_SWAP_FEE_BPS,
            price_impact_factor_bps: DEFAULT_PRICE_IMPACT_FACTOR_BPS,
            max_supply: tokens_u128(DEFAULT_MAX_SUPPLY_TOKENS),
            circulating_supply: tokens_u128(DEFAULT_CIRCULATING_TOKENS),
        }
    }
}

/// The AVAX/NTH constant-product pool.
pub struct LiquidityPool {
    base_reserve: u64,
    token_reserve: u64,
    swap_fee_bps: u64,
    price_impact_factor_bps: u64,
    positions: HashMap<Address, LiquidityPosition>,
    supply: TokenSupply,
    events: Arc<dyn EventSink>,
}

impl LiquidityPool {
    pub fn new(params: PoolParams) -> CoreResult<Self> {
        Self::with_events(params, Arc::new(NullSink))
    }

    pub fn with_events(params: PoolParams, events: Arc<dyn EventSink>) -> CoreResult<Self> {
        if params.base_reserve == 0 || params.token_reserve == 0 {
            return Err(CoreError::InvalidPoolParameter("reserves must be non-zero"));
        }
        if params.swap_fee_bps >= BPS_DENOMINATOR {
            return Err(CoreError::InvalidPoolParameter("swap fee must be below 100%"));
        }
        if params.max_supply < tokens_u128(SUPPLY_FLOOR_TOKENS) {
            return Err(CoreError::InvalidPoolParameter("max supply below the floor"));
        }
        if params.circulating_supply > params.max_supply {
            return Err(CoreError::InvalidPoolParameter(
                "circulating supply exceeds max supply",
            ));
        }
        Ok(Self {
            base_reserve: params.base_reserve,
            token_reserve: params.token_reserve,
            swap_fee_bps: params.swap_fee_bps,
            price_impact_factor_bps: params.price_impact_factor_bps,
            positions: HashMap::new(),
            supply: TokenSupply::new(params.max_supply, params.circulating_supply),
            events,
        })
    }

    // ========================================================================
    // Read side
    // ========================================================================

    pub fn base_reserve(&self) -> u64 {
        self.base_reserve
    }

    pub fn token_reserve(&self) -> u64 {
        self.token_reserve
    }

    pub fn supply(&self) -> &TokenSupply {
        &self.supply
    }

    /// Spot price of NTH in base-asset terms.
    pub fn spot_price(&self) -> f64 {
        spot_price(self.base_reserve, self.token_reserve)
    }

    /// The invariant product `k`.
    pub fn constant_product(&self) -> u128 {
        self.base_reserve as u128 * self.token_reserve as u128
    }

    pub fn provider_count(&self) -> usize {
        self.positions.len()
    }

    pub fn position(&self, provider: &Address) -> Option<&LiquidityPosition> {
        self.positions.get(provider)
    }

    // ========================================================================
    // Liquidity
    // ========================================================================

    /// Token amount a deposit of `amount_base` must be matched with.
    pub fn quote_add_liquidity(&self, amount_base: u64) -> CoreResult<u64> {
        quote_matching_deposit(self.base_reserve, self.token_reserve, amount_base)
    }

    /// Deposit `amount_base` plus the matching token amount, debited from
    /// the provider's ledger balance. The debit is validated before any
    /// state changes.
    pub fn add_liquidity(
        &mut self,
        ledger: &mut BalanceLedger,
        provider: &Address,
        amount_base: u64,
    ) -> CoreResult<LiquidityReceipt> {
        let token_amount = self.quote_add_liquidity(amount_base)?;
        let new_base = safe_add_u64(self.base_reserve, amount_base)?;
        let new_token = safe_add_u64(self.token_reserve, token_amount)?;
        let units_issued = liquidity_units(amount_base, token_amount);

        ledger.debit(provider, token_amount)?;

        self.base_reserve = new_base;
        self.token_reserve = new_token;
        let position = self.positions.entry(provider.clone()).or_default();
        position.base_contributed = safe_add_u64(position.base_contributed, amount_base)?;
        position.token_contributed = safe_add_u64(position.token_contributed, token_amount)?;
        position.units = safe_add_u128(position.units, units_issued)?;

        self.events.publish(&Event::LiquidityAdded {
            provider: provider.clone(),
            base_amount: amount_base,
            token_amount,
            units_issued,
        });

        Ok(LiquidityReceipt {
            token_amount,
            units_issued,
        })
    }

    // ========================================================================
    // Swaps
    // ========================================================================

    pub fn quote_swap(&self, amount_in: u64) -> CoreResult<SwapQuote> {
        quote_constant_product(
            self.base_reserve,
            self.token_reserve,
            amount_in,
            self.swap_fee_bps,
            self.price_impact_factor_bps,
        )
    }

    /// Swap `amount_in` base asset for tokens, crediting the buyer's
    /// off-pool balance and bumping the circulating supply.
    pub fn swap(
        &mut self,
        ledger: &mut BalanceLedger,
        buyer: &Address,
        amount_in: u64,
    ) -> CoreResult<SwapQuote> {
        let quote = self.quote_swap(amount_in)?;
        let new_base = safe_add_u64(self.base_reserve, amount_in)?;
        let new_token = safe_sub_u64(self.token_reserve, quote.amount_out)?;
        let new_circulating =
            safe_add_u128(self.supply.circulating, quote.amount_out as u128)?;

        ledger.credit(buyer, quote.amount_out)?;

        self.base_reserve = new_base;
        self.token_reserve = new_token;
        self.supply.circulating = new_circulating;

        self.events.publish(&Event::Swapped {
            buyer: buyer.clone(),
            base_in: amount_in,
            token_out: quote.amount_out,
            new_price: self.spot_price(),
        });

        Ok(quote)
    }

    // ========================================================================
    // Supply
    // ========================================================================

    /// Burn tokens from a holder's balance, moving them from circulating to
    /// burned supply. Pool reserves are untouched.
    pub fn burn(
        &mut self,
        ledger: &mut BalanceLedger,
        holder: &Address,
        amount: u64,
    ) -> CoreResult<u64> {
        if amount == 0 {
            return Err(CoreError::InvalidAmount);
        }
        let new_circulating = safe_sub_u128(self.supply.circulating, amount as u128)?;
        let new_burned = safe_add_u128(self.supply.burned, amount as u128)?;

        let new_balance = ledger.burn(holder, amount)?;

        self.supply.circulating = new_circulating;
        self.supply.burned = new_burned;

        self.events.publish(&Event::TokensBurned {
            holder: holder.clone(),
            amount,
        });

        Ok(new_balance)
    }

    /// Apply a governed max-supply change. Called by proposal execution.
    pub fn set_max_supply(&mut self, new_supply: u128) -> CoreResult<()> {
        if new_supply < tokens_u128(SUPPLY_FLOOR_TOKENS) {
            return Err(CoreError::SupplyBelowFloor);
        }
        let previous = self.supply.max;
        self.supply.max = new_supply;
        self.events.publish(&Event::MaxSupplyChanged {
            previous,
            new: new_supply,
        });
        Ok(())
    }
}
