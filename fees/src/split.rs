//! Splitting a transfer amount into net and per-bucket fee parts.

use crate::rates::{FeeRateBps, FeeRates, FEE_MULTIPLIER};

/// Absolute fee amounts deducted from a single transfer, one per bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeSplit {
    /// Tokens accumulated by the contract for liquidity provisioning.
    pub liquidity: u128,

    /// Tokens owed to the production fee wallet.
    pub production: u128,

    /// Tokens owed to the platform fee wallet.
    pub platform: u128,
}

impl FeeSplit {
    /// A split that collects nothing.
    pub const ZERO: FeeSplit = FeeSplit {
        liquidity: 0,
        production: 0,
        platform: 0,
    };

    /// Total fee deducted from the transfer.
    pub fn total(&self) -> u128 {
        self.liquidity + self.production + self.platform
    }

    /// True when no bucket collects anything.
    pub fn is_zero(&self) -> bool {
        self.total() == 0
    }
}

/// One fee bucket, floored independently of the others.
fn fee_part(amount: u128, rate: FeeRateBps) -> u128 {
    amount * rate as u128 / FEE_MULTIPLIER as u128
}

/// Compute the net amount and fee breakdown for a transfer.
///
/// If either endpoint is exempt the transfer passes through whole and no
/// bucket collects. Otherwise each bucket takes
/// `floor(amount * rate / multiplier)` — per-bucket flooring, never
/// sum-then-divide — and the net is the remainder, so
/// `net + split.total() == amount` always holds.
///
/// Callers must keep `amount` at or below
/// [`MAX_SPLITTABLE_AMOUNT`](crate::MAX_SPLITTABLE_AMOUNT) and pass rates
/// that satisfy [`FeeRates::is_valid`]; within those bounds the function is
/// total. An out-of-range numerator can wrap the per-bucket product.
pub fn compute_split(
    amount: u128,
    rates: &FeeRates,
    sender_exempt: bool,
    recipient_exempt: bool,
) -> (u128, FeeSplit) {
    debug_assert!(amount <= crate::MAX_SPLITTABLE_AMOUNT);
    debug_assert!(rates.is_valid());

    if sender_exempt || recipient_exempt {
        return (amount, FeeSplit::ZERO);
    }

    let split = FeeSplit {
        liquidity: fee_part(amount, rates.liquidity),
        production: fee_part(amount, rates.production),
        platform: fee_part(amount, rates.platform),
    };
    let net = amount - split.total();

    (net, split)
}
