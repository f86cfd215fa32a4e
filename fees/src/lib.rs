//! Fee policy for the ouro token: a configurable multi-way split applied to
//! every non-exempt transfer.
//!
//! Each transfer pays three independent fees, expressed as integer
//! numerators over a fixed denominator ([`FEE_MULTIPLIER`]):
//!
//! | Bucket     | Destination                               |
//! |------------|-------------------------------------------|
//! | Liquidity  | Accumulated by the contract, later paired |
//! |            | into the exchange pool                    |
//! | Production | Production fee wallet                     |
//! | Platform   | Platform fee wallet                       |
//!
//! ## Rounding
//!
//! Each bucket is floored **independently** (`amount * rate / multiplier`
//! per bucket, never sum-then-divide). Up to `buckets - 1` units of fee can
//! round away per transfer; the shortfall stays inside the net amount
//! credited to the recipient, so no value is ever lost from the ledger.
//!
//! ## Determinism
//!
//! All arithmetic is integer-only. Callers that cap amounts at
//! [`MAX_SPLITTABLE_AMOUNT`] get a total function with no overflow path.

mod rates;
mod split;

pub use rates::{FeeRateBps, FeeRates, FEE_MULTIPLIER, MAX_SPLITTABLE_AMOUNT};
pub use split::{compute_split, FeeSplit};
