//! Node configuration loaded from a TOML file.
//!
//! Token amounts are whole tokens here; conversion into base units happens
//! when the core components are constructed.

use std::fs;
use std::net::SocketAddr;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use nothing_core::constants::{
    tokens, tokens_u128, BPS_DENOMINATOR, DEFAULT_BASE_RESERVE_TOKENS,
    DEFAULT_CIRCULATING_TOKENS, DEFAULT_MAX_SUPPLY_TOKENS, DEFAULT_MIN_PROPOSER_BPS,
    DEFAULT_PRICE_IMPACT_FACTOR_BPS, DEFAULT_QUORUM_BPS, DEFAULT_SWAP_FEE_BPS,
    DEFAULT_TOKEN_RESERVE_TOKENS, DEFAULT_VOTING_PERIOD_SECS, SUPPLY_FLOOR_TOKENS,
};
use nothing_core::governance::GovernanceParams;
use nothing_core::ledger::Address;
use nothing_core::pool::PoolParams;
use nothing_core::UNIT;

/// Largest whole-token figure that converts to u64 base units.
const MAX_WHOLE_TOKENS: u64 = u64::MAX / UNIT;

/// Node configuration loaded from TOML file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeConfig {
    /// Listen address for the REST API
    pub listen_addr: String,

    /// Wallet used when requests omit an address (the mock identity)
    pub default_wallet: String,

    /// Balance seeded for the default wallet, in whole tokens
    pub default_wallet_balance_tokens: u64,

    /// Proposal evaluation interval in seconds
    pub evaluation_interval_secs: u64,

    /// Path of the proposal store file
    pub store_path: String,

    pub pool: PoolSettings,

    pub governance: GovernanceSettings,
}

/// Pool seeding and pricing parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PoolSettings {
    /// Initial base-asset (AVAX) reserve, in whole tokens
    pub base_reserve_tokens: u64,

    /// Initial NTH reserve, in whole tokens
    pub token_reserve_tokens: u64,

    /// Swap fee in basis points
    pub swap_fee_bps: u64,

    /// Price impact factor in basis points
    pub price_impact_factor_bps: u64,

    /// Max supply, in whole tokens
    pub max_supply_tokens: u64,

    /// Initial circulating supply, in whole tokens
    pub circulating_tokens: u64,
}

/// Governance thresholds
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GovernanceSettings {
    /// Quorum as basis points of max supply
    pub quorum_bps: u64,

    /// Proposer holding threshold as basis points of max supply
    pub min_proposer_bps: u64,

    /// Voting window in seconds
    pub voting_period_secs: i64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            default_wallet: "0x9b710EAa56B1a7D45f12C9c642D8CeE766405489".to_string(),
            default_wallet_balance_tokens: 1_000,
            evaluation_interval_secs: 10,
            store_path: "proposals.json".to_string(),
            pool: PoolSettings::default(),
            governance: GovernanceSettings::default(),
        }
    }
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            base_reserve_tokens: DEFAULT_BASE_RESERVE_TOKENS,
            token_reserve_tokens: DEFAULT_TOKEN_RESERVE_TOKENS,
            swap_fee_bps: DEFAULT_SWAP_FEE_BPS,
            price_impact_factor_bps: DEFAULT_PRICE_IMPACT_FACTOR_BPS,
            max_supply_tokens: DEFAULT_MAX_SUPPLY_TOKENS,
            circulating_tokens: DEFAULT_CIRCULATING_TOKENS,
        }
    }
}

impl Default for GovernanceSettings {
    fn default() -> Self {
        Self {
            quorum_bps: DEFAULT_QUORUM_BPS,
            min_proposer_bps: DEFAULT_MIN_PROPOSER_BPS,
            voting_period_secs: DEFAULT_VOTING_PERIOD_SECS,
        }
    }
}

impl NodeConfig {
    /// Load configuration from TOML file
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path))?;
        let config: NodeConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self).context("failed to serialize config")?;
        fs::write(path, content).with_context(|| format!("failed to write config file {}", path))?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            bail!("listen_addr {:?} is not a valid socket address", self.listen_addr);
        }
        if Address::parse(&self.default_wallet).is_err() {
            bail!("default_wallet {:?} is not a valid address", self.default_wallet);
        }
        if self.evaluation_interval_secs == 0 {
            bail!("evaluation_interval_secs must be greater than 0");
        }
        if self.default_wallet_balance_tokens > MAX_WHOLE_TOKENS {
            bail!(
                "default_wallet_balance_tokens must be at most {}",
                MAX_WHOLE_TOKENS
            );
        }
        if self.store_path.is_empty() {
            bail!("store_path must not be empty");
        }
        self.pool.validate()?;
        self.governance.validate()?;
        Ok(())
    }

    /// Pool construction parameters, in base units.
    pub fn pool_params(&self) -> PoolParams {
        PoolParams {
            base_reserve: tokens(self.pool.base_reserve_tokens),
            token_reserve: tokens(self.pool.token_reserve_tokens),
            swap_fee_bps: self.pool.swap_fee_bps,
            price_impact_factor_bps: self.pool.price_impact_factor_bps,
            max_supply: tokens_u128(self.pool.max_supply_tokens),
            circulating_supply: tokens_u128(self.pool.circulating_tokens),
        }
    }

    /// Governance parameters, in base units.
    pub fn governance_params(&self) -> GovernanceParams {
        GovernanceParams {
            quorum_bps: self.governance.quorum_bps,
            min_proposer_bps: self.governance.min_proposer_bps,
            voting_period_secs: self.governance.voting_period_secs,
            ..GovernanceParams::default()
        }
    }
}

impl PoolSettings {
    fn validate(&self) -> Result<()> {
        if self.base_reserve_tokens == 0 || self.token_reserve_tokens == 0 {
            bail!("pool reserves must be greater than 0");
        }
        if self.base_reserve_tokens > MAX_WHOLE_TOKENS
            || self.token_reserve_tokens > MAX_WHOLE_TOKENS
        {
            bail!("pool reserves must be at most {} tokens", MAX_WHOLE_TOKENS);
        }
        if self.swap_fee_bps >= BPS_DENOMINATOR {
            bail!("swap_fee_bps must be below {}", BPS_DENOMINATOR);
        }
        if self.max_supply_tokens < SUPPLY_FLOOR_TOKENS {
            bail!(
                "max_supply_tokens must be at least {}",
                SUPPLY_FLOOR_TOKENS
            );
        }
        if self.circulating_tokens > self.max_supply_tokens {
            bail!("circulating_tokens must not exceed max_supply_tokens");
        }
        Ok(())
    }
}

impl GovernanceSettings {
    fn validate(&self) -> Result<()> {
        if self.quorum_bps == 0 || self.quorum_bps > BPS_DENOMINATOR {
            bail!("quorum_bps must be between 1 and {}", BPS_DENOMINATOR);
        }
        if self.min_proposer_bps > BPS_DENOMINATOR {
            bail!("min_proposer_bps must be at most {}", BPS_DENOMINATOR);
        }
        if self.voting_period_secs <= 0 {
            bail!("voting_period_secs must be greater than 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(NodeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_catches_bad_values() {
        let mut config = NodeConfig::default();
        config.listen_addr = "not an address".to_string();
        assert!(config.validate().is_err());

        let mut config = NodeConfig::default();
        config.default_wallet = "0x1234".to_string();
        assert!(config.validate().is_err());

        let mut config = NodeConfig::default();
        config.evaluation_interval_secs = 0;
        assert!(config.validate().is_err());

        let mut config = NodeConfig::default();
        config.pool.swap_fee_bps = BPS_DENOMINATOR;
        assert!(config.validate().is_err());

        let mut config = NodeConfig::default();
        config.pool.max_supply_tokens = SUPPLY_FLOOR_TOKENS - 1;
        assert!(config.validate().is_err());

        let mut config = NodeConfig::default();
        config.governance.voting_period_secs = 0;
        assert!(config.validate().is_err());

        let mut config = NodeConfig::default();
        config.pool.base_reserve_tokens = MAX_WHOLE_TOKENS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = NodeConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: NodeConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.listen_addr, config.listen_addr);
        assert_eq!(parsed.pool.swap_fee_bps, config.pool.swap_fee_bps);
        assert_eq!(
            parsed.governance.voting_period_secs,
            config.governance.voting_period_secs
        );
    }

    #[test]
    fn test_params_convert_to_base_units() {
        let config = NodeConfig::default();
        let params = config.pool_params();
        assert_eq!(params.base_reserve, 5_000 * nothing_core::UNIT);
        assert_eq!(
            params.max_supply,
            10_000_000_000u128 * nothing_core::UNIT as u128
        );
    }
}
