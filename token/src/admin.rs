//! Administration: owner-gated mutation of fee rates, wallets, threshold and
//! exclusion membership.
//!
//! Every operation checks the caller's capability first, validates the new
//! values next, and only then writes — a rejected call never leaves partial
//! configuration behind. Changes are effective for the next transfer; none
//! retroactively touch settled balances.

use ouro_fees::{FeeRateBps, FeeRates};
use tracing::info;

use crate::address::Address;
use crate::config::FeeWallets;
use crate::contract::Token;
use crate::error::{TokenError, TokenResult};

impl Token {
    fn ensure_owner(&self, caller: Address) -> TokenResult<()> {
        if caller != self.owner {
            return Err(TokenError::Unauthorized);
        }
        Ok(())
    }

    /// Overwrite all three fee rates atomically.
    pub fn change_fees(
        &mut self,
        caller: Address,
        liquidity: FeeRateBps,
        production: FeeRateBps,
        platform: FeeRateBps,
    ) -> TokenResult<()> {
        self.ensure_owner(caller)?;

        let rates = FeeRates::new(liquidity, production, platform);
        if !rates.is_valid() {
            return Err(TokenError::InvalidConfiguration(format!(
                "fee rates sum to {} bps, above the multiplier",
                rates.total_bps()
            )));
        }

        self.config.fees = rates;
        info!(liquidity, production, platform, "fee rates changed");
        Ok(())
    }

    /// Overwrite all three fee destination wallets atomically.
    pub fn change_wallets(
        &mut self,
        caller: Address,
        liquidity: Address,
        production: Address,
        platform: Address,
    ) -> TokenResult<()> {
        self.ensure_owner(caller)?;

        for (name, wallet) in [
            ("liquidity", liquidity),
            ("production", production),
            ("platform", platform),
        ] {
            if wallet.is_zero() {
                return Err(TokenError::InvalidConfiguration(format!(
                    "{name} wallet must not be the zero address"
                )));
            }
        }

        self.config.wallets = FeeWallets {
            liquidity,
            production,
            platform,
        };
        info!(%liquidity, %production, %platform, "fee wallets changed");
        Ok(())
    }

    /// Overwrite the contract-held balance at which swap-and-liquify arms.
    pub fn update_liquify_threshold(&mut self, caller: Address, amount: u128) -> TokenResult<()> {
        self.ensure_owner(caller)?;
        if amount == 0 {
            return Err(TokenError::InvalidConfiguration(
                "liquify threshold must be positive".to_string(),
            ));
        }

        self.config.liquify_threshold = amount;
        info!(threshold = amount, "liquify threshold changed");
        Ok(())
    }

    /// Toggle fee exclusion for `account`.
    pub fn set_fee_exclusion(
        &mut self,
        caller: Address,
        account: Address,
        excluded: bool,
    ) -> TokenResult<()> {
        self.ensure_owner(caller)?;
        self.exclusions.set_excluded(account, excluded);
        info!(account = %account, excluded, "fee exclusion changed");
        Ok(())
    }

    /// Hand the base asset accumulated as liquidity-addition change to the
    /// owner and zero the tally. Returns the swept amount.
    pub fn sweep_base_asset(&mut self, caller: Address) -> TokenResult<u128> {
        self.ensure_owner(caller)?;
        let swept = std::mem::take(&mut self.held_base);
        if swept > 0 {
            info!(amount = swept, "base asset swept");
        }
        Ok(swept)
    }
}
