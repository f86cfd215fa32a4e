//! The token contract: ledger surface, fee application and the trigger for
//! swap-and-liquify.
//!
//! Every external transfer enters through [`Token::transfer`] or
//! [`Token::transfer_from`], which consult the fee policy and the exclusion
//! registry, settle the balance movements, and then ask the liquidity
//! manager whether a swap-and-liquify cycle is due. If it is, the cycle runs
//! synchronously before the call returns.

use ouro_fees::{compute_split, FeeRates, MAX_SPLITTABLE_AMOUNT};
use tracing::debug;

use crate::address::Address;
use crate::config::{FeeWallets, TokenConfig};
use crate::error::{TokenError, TokenResult};
use crate::exclusion::FeeExclusions;
use crate::ledger::Ledger;
use crate::router::SwapRouter;

/// Accounting core of the fee-bearing token. Sole owner of the ledger, the
/// exclusion registry and the configuration; callers only reach them through
/// the operations below.
#[derive(Debug)]
pub struct Token {
    /// The contract's own ledger account; accumulates liquidity-fee tokens.
    pub(crate) address: Address,

    /// Holder of the administration capability.
    pub(crate) owner: Address,

    pub(crate) config: TokenConfig,
    pub(crate) ledger: Ledger,
    pub(crate) exclusions: FeeExclusions,

    /// Base asset held by the contract awaiting manual sweep (change from
    /// liquidity additions).
    pub(crate) held_base: u128,

    /// True while a swap-and-liquify cycle is executing; never persisted
    /// beyond the call that set it.
    pub(crate) swap_in_progress: bool,
}

impl Token {
    /// One-time initialization: validates the configuration, credits the
    /// entire supply to `owner`, and excludes both `owner` and the
    /// contract's own account from fees.
    pub fn initialize(
        address: Address,
        owner: Address,
        total_supply: u128,
        config: TokenConfig,
    ) -> TokenResult<Self> {
        config.validate()?;
        if total_supply > MAX_SPLITTABLE_AMOUNT {
            return Err(TokenError::InvalidConfiguration(format!(
                "total supply {total_supply} exceeds the maximum splittable amount"
            )));
        }

        let mut exclusions = FeeExclusions::new();
        exclusions.set_excluded(owner, true);
        exclusions.set_excluded(address, true);

        Ok(Self {
            address,
            owner,
            config,
            ledger: Ledger::with_initial_supply(owner, total_supply),
            exclusions,
            held_base: 0,
            swap_in_progress: false,
        })
    }

    /// Transfer `amount` from the caller to `to`, applying the fee split
    /// unless either endpoint is excluded. May run a swap-and-liquify cycle
    /// before returning.
    pub fn transfer(
        &mut self,
        caller: Address,
        to: Address,
        amount: u128,
        router: &mut dyn SwapRouter,
    ) -> TokenResult<()> {
        self.settle_transfer(caller, to, amount)?;
        if caller != self.address {
            self.maybe_swap_and_liquify(router);
        }
        Ok(())
    }

    /// Set the caller's allowance for `spender`. Overwrite semantics,
    /// last write wins.
    pub fn approve(&mut self, caller: Address, spender: Address, amount: u128) {
        self.ledger.approve(caller, spender, amount);
        debug!(owner = %caller, spender = %spender, amount, "allowance set");
    }

    /// Delegated transfer: spend the caller's allowance from `from` and move
    /// `amount` through the same fee-adjusted path as [`Token::transfer`].
    ///
    /// The allowance is checked first and decremented only after the balance
    /// movement succeeds, so a failed transfer leaves both the allowance and
    /// every balance untouched.
    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: u128,
        router: &mut dyn SwapRouter,
    ) -> TokenResult<()> {
        let allowed = self.ledger.allowance(from, caller);
        if allowed < amount {
            return Err(TokenError::InsufficientAllowance {
                allowed,
                requested: amount,
            });
        }

        self.settle_transfer(from, to, amount)?;
        // Cannot fail: the pre-check above saw the same allowance and
        // settle_transfer never touches allowances.
        self.ledger.spend_allowance(from, caller, amount)?;

        if from != self.address {
            self.maybe_swap_and_liquify(router);
        }
        Ok(())
    }

    /// Apply the fee split and move every part. The sender is debited the
    /// full amount up front, so either the whole movement applies or none
    /// of it does.
    fn settle_transfer(&mut self, from: Address, to: Address, amount: u128) -> TokenResult<()> {
        let (net, split) = compute_split(
            amount,
            &self.config.fees,
            self.exclusions.is_excluded(from),
            self.exclusions.is_excluded(to),
        );

        let available = self.ledger.balance_of(from);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                available,
                requested: amount,
            });
        }

        // net + split.total() == amount, so these four credits together
        // consume exactly what the sender is debited.
        self.ledger.move_balance(from, to, net)?;
        self.ledger.move_balance(from, self.address, split.liquidity)?;
        self.ledger
            .move_balance(from, self.config.wallets.production, split.production)?;
        self.ledger
            .move_balance(from, self.config.wallets.platform, split.platform)?;

        debug!(
            from = %from,
            to = %to,
            amount,
            net,
            fee = split.total(),
            "transfer settled"
        );
        Ok(())
    }

    /// Balance of an account.
    pub fn balance_of(&self, account: Address) -> u128 {
        self.ledger.balance_of(account)
    }

    /// The fixed total supply.
    pub fn total_supply(&self) -> u128 {
        self.ledger.total_supply()
    }

    /// Allowance granted by `owner` to `spender`.
    pub fn allowance(&self, owner: Address, spender: Address) -> u128 {
        self.ledger.allowance(owner, spender)
    }

    /// Whether `account` is exempt from transfer fees.
    pub fn is_excluded_from_fee(&self, account: Address) -> bool {
        self.exclusions.is_excluded(account)
    }

    /// Current fee rates.
    pub fn fee_rates(&self) -> FeeRates {
        self.config.fees
    }

    /// Current fee destination wallets.
    pub fn fee_wallets(&self) -> FeeWallets {
        self.config.wallets
    }

    /// Contract-held balance at which swap-and-liquify arms.
    pub fn liquify_threshold(&self) -> u128 {
        self.config.liquify_threshold
    }

    /// Base asset held by the contract awaiting sweep.
    pub fn held_base_asset(&self) -> u128 {
        self.held_base
    }

    /// The administration capability holder.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// The contract's own ledger account.
    pub fn address(&self) -> Address {
        self.address
    }
}
