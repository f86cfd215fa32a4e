//! Token configuration: fee rates, fee wallets, liquify threshold and the
//! router deadline grace window.
//!
//! The configuration is an explicit struct threaded into the fee policy and
//! the liquidity manager at call time; the administration operations own the
//! only write path. A config can also be loaded from a TOML file:
//!
//! ```toml
//! liquify_threshold = "1000000000000000000"
//! swap_deadline_secs = 300
//!
//! [fees]
//! liquidity = 200
//! production = 600
//! platform = 200
//!
//! [wallets]
//! liquidity = "0x1111111111111111111111111111111111111111"
//! production = "0x2222222222222222222222222222222222222222"
//! platform = "0x3333333333333333333333333333333333333333"
//! ```
//!
//! Token amounts are written as decimal strings because TOML integers are
//! signed 64-bit and amounts are `u128`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ouro_fees::FeeRates;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::{TokenError, TokenResult};

/// Destination wallets for the three fee buckets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeWallets {
    /// Receives ownership of minted liquidity positions.
    pub liquidity: Address,

    /// Receives the production fee part of each transfer.
    pub production: Address,

    /// Receives the platform fee part of each transfer.
    pub platform: Address,
}

impl FeeWallets {
    fn validate(&self) -> TokenResult<()> {
        for (name, wallet) in [
            ("liquidity", self.liquidity),
            ("production", self.production),
            ("platform", self.platform),
        ] {
            if wallet.is_zero() {
                return Err(TokenError::InvalidConfiguration(format!(
                    "{name} wallet must not be the zero address"
                )));
            }
        }
        Ok(())
    }
}

/// Mutable configuration surface of the token.
///
/// Scalar fields precede the table-valued ones so the struct serializes to
/// TOML as written in the module example.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Contract-held token balance at which swap-and-liquify arms, in the
    /// token's smallest unit.
    #[serde(with = "serde_amount", default = "default_liquify_threshold")]
    pub liquify_threshold: u128,

    /// Grace window added to the current time for router call deadlines.
    #[serde(default = "default_swap_deadline_secs")]
    pub swap_deadline_secs: u64,

    /// Fee rate numerators over [`ouro_fees::FEE_MULTIPLIER`].
    pub fees: FeeRates,

    /// Fee destination wallets.
    pub wallets: FeeWallets,
}

fn default_liquify_threshold() -> u128 {
    // 1 token at 18 decimals, the reference deployment value
    1_000_000_000_000_000_000
}

fn default_swap_deadline_secs() -> u64 {
    300
}

impl TokenConfig {
    /// Reject nonsensical configurations before any of them reach state.
    pub fn validate(&self) -> TokenResult<()> {
        if !self.fees.is_valid() {
            return Err(TokenError::InvalidConfiguration(format!(
                "fee rates sum to {} bps, above the multiplier",
                self.fees.total_bps()
            )));
        }
        self.wallets.validate()?;
        if self.liquify_threshold == 0 {
            return Err(TokenError::InvalidConfiguration(
                "liquify threshold must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Load and validate a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        let config: TokenConfig = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config in {}", path.display()))?;
        Ok(config)
    }
}

/// Serialize `u128` amounts as decimal strings (TOML integers are i64).
mod serde_amount {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(amount: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&amount.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid amount {s:?}")))
    }
}
