//! Exchange router capability.
//!
//! The external exchange is reached through a narrow, injected interface:
//! swap an exact amount of token for the base asset, and add liquidity
//! pairing token with base asset. Both are best-effort synchronous calls
//! with a deadline; the token→base path is the only one this core uses, so
//! the router's path argument collapses into the trait itself.
//!
//! Nothing about the exchange is hardcoded: callers hand a
//! `&mut dyn SwapRouter` into the operations that may need it, and tests
//! substitute [`FixedRateRouter`].

use crate::address::Address;

/// Failure reported by an external router call. These are caught by the
/// liquidity manager and treated as a non-fatal step failure, never as an
/// error of the enclosing transfer.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    /// The swap call was rejected or reverted.
    #[error("swap rejected by router: {0}")]
    SwapRejected(String),

    /// The add-liquidity call was rejected or reverted.
    #[error("liquidity addition rejected by router: {0}")]
    LiquidityRejected(String),
}

/// Amounts consumed and minted by a successful add-liquidity call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LiquidityOutcome {
    /// Tokens actually taken into the pool (at most the desired amount).
    pub token_used: u128,

    /// Base asset actually taken into the pool (at most the desired amount).
    pub base_used: u128,

    /// Liquidity position units minted to the configured recipient.
    pub liquidity_minted: u128,
}

/// Capability handle onto the external exchange router and its pool.
pub trait SwapRouter {
    /// The ledger account representing the pool side of the token/base
    /// pair. Tokens consumed by swaps and liquidity additions are moved to
    /// this account, so the ledger's conservation invariant keeps holding.
    fn pair_address(&self) -> Address;

    /// Swap exactly `amount_in` tokens for base asset, crediting proceeds
    /// to `recipient`. No minimum output is enforced by this core
    /// (documented slippage risk of the liquify design).
    fn swap_exact_tokens_for_base(
        &mut self,
        amount_in: u128,
        recipient: Address,
        deadline: u64,
    ) -> Result<u128, RouterError>;

    /// Add liquidity pairing up to `amount_token_desired` tokens with up to
    /// `amount_base_desired` base asset, minting the position to `to`.
    #[allow(clippy::too_many_arguments)]
    fn add_liquidity_base(
        &mut self,
        amount_token_desired: u128,
        amount_base_desired: u128,
        amount_token_min: u128,
        amount_base_min: u128,
        to: Address,
        deadline: u64,
    ) -> Result<LiquidityOutcome, RouterError>;
}

/// A recorded swap call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapCall {
    pub amount_in: u128,
    pub recipient: Address,
    pub deadline: u64,
}

/// A recorded add-liquidity call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiquidityCall {
    pub amount_token_desired: u128,
    pub amount_base_desired: u128,
    pub to: Address,
    pub deadline: u64,
}

/// Deterministic in-memory router for tests and simulation.
///
/// Swaps convert at a fixed `rate_num / rate_den` base-per-token rate.
/// Liquidity additions consume all offered tokens and a configurable
/// fraction of the offered base asset (in bps), which models the change a
/// real pool returns when the pair ratio moves between swap and addition.
/// Every call is recorded, and either call can be told to fail.
#[derive(Clone, Debug)]
pub struct FixedRateRouter {
    pair: Address,
    rate_num: u128,
    rate_den: u128,
    base_consumed_bps: u32,
    fail_swaps: bool,
    fail_liquidity: bool,

    /// Every swap call seen, in order.
    pub swaps: Vec<SwapCall>,

    /// Every add-liquidity call seen, in order.
    pub liquidity_calls: Vec<LiquidityCall>,

    /// Total liquidity units minted so far.
    pub total_liquidity_minted: u128,
}

impl FixedRateRouter {
    /// Router converting at `rate_num / rate_den` base per token, pooling
    /// into `pair`.
    pub fn new(pair: Address, rate_num: u128, rate_den: u128) -> Self {
        Self {
            pair,
            rate_num,
            rate_den: rate_den.max(1),
            base_consumed_bps: 10_000,
            fail_swaps: false,
            fail_liquidity: false,
            swaps: Vec::new(),
            liquidity_calls: Vec::new(),
            total_liquidity_minted: 0,
        }
    }

    /// Router converting 1:1, pooling into `pair`.
    pub fn one_to_one(pair: Address) -> Self {
        Self::new(pair, 1, 1)
    }

    /// Consume only `bps`/10000 of the offered base asset per liquidity
    /// addition, leaving the rest as change.
    pub fn with_base_consumed_bps(mut self, bps: u32) -> Self {
        self.base_consumed_bps = bps.min(10_000);
        self
    }

    /// Make every swap call fail.
    pub fn failing_swaps(mut self) -> Self {
        self.fail_swaps = true;
        self
    }

    /// Make every add-liquidity call fail.
    pub fn failing_liquidity(mut self) -> Self {
        self.fail_liquidity = true;
        self
    }
}

impl SwapRouter for FixedRateRouter {
    fn pair_address(&self) -> Address {
        self.pair
    }

    fn swap_exact_tokens_for_base(
        &mut self,
        amount_in: u128,
        recipient: Address,
        deadline: u64,
    ) -> Result<u128, RouterError> {
        self.swaps.push(SwapCall {
            amount_in,
            recipient,
            deadline,
        });
        if self.fail_swaps {
            return Err(RouterError::SwapRejected("router offline".to_string()));
        }
        Ok(amount_in * self.rate_num / self.rate_den)
    }

    fn add_liquidity_base(
        &mut self,
        amount_token_desired: u128,
        amount_base_desired: u128,
        _amount_token_min: u128,
        _amount_base_min: u128,
        to: Address,
        deadline: u64,
    ) -> Result<LiquidityOutcome, RouterError> {
        self.liquidity_calls.push(LiquidityCall {
            amount_token_desired,
            amount_base_desired,
            to,
            deadline,
        });
        if self.fail_liquidity {
            return Err(RouterError::LiquidityRejected(
                "router offline".to_string(),
            ));
        }

        let base_used = amount_base_desired * self.base_consumed_bps as u128 / 10_000;
        let liquidity_minted = amount_token_desired.min(base_used);
        self.total_liquidity_minted += liquidity_minted;

        Ok(LiquidityOutcome {
            token_used: amount_token_desired,
            base_used,
            liquidity_minted,
        })
    }
}
