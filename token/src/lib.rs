//! Accounting core of a fee-bearing fungible token.
//!
//! The [`Token`] owns a balance/allowance ledger, applies a configurable
//! three-way fee split on transfers (liquidity / production / platform), and
//! autonomously converts accumulated liquidity-fee tokens into an exchange
//! liquidity position once a threshold is reached ("swap-and-liquify").
//!
//! ## Components
//!
//! - [`Ledger`] — balances and allowances, checked moves, fixed supply.
//! - [`ouro_fees`] — pure fee-split computation (re-exported below).
//! - [`FeeExclusions`] — addresses exempt from fees on either side of a
//!   transfer; owner and contract are members from initialization.
//! - [`SwapRouter`] — injected capability for the external exchange router;
//!   [`FixedRateRouter`] is a deterministic in-memory implementation.
//! - Administration — owner-gated mutators on [`Token`] for rates, wallets,
//!   threshold and exclusion membership.
//!
//! ## Execution model
//!
//! Calls are strictly sequential: every operation takes `&mut self` and runs
//! to completion, including any synchronous swap-and-liquify cycle it
//! triggers. The only guarded hazard is the swap routine re-arming itself
//! through its own internal transfers; a scoped guard around the routine
//! prevents that.

mod address;
mod admin;
mod config;
mod contract;
mod error;
mod exclusion;
mod ledger;
mod liquidity;
mod router;

pub use address::{Address, ParseAddressError, ADDRESS_LEN};
pub use config::{FeeWallets, TokenConfig};
pub use contract::Token;
pub use error::{TokenError, TokenResult};
pub use exclusion::FeeExclusions;
pub use ledger::Ledger;
pub use router::{
    FixedRateRouter, LiquidityCall, LiquidityOutcome, RouterError, SwapCall, SwapRouter,
};

pub use ouro_fees::{compute_split, FeeRateBps, FeeRates, FeeSplit, FEE_MULTIPLIER};
