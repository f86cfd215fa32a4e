//! Fee rate configuration.

/// Fee rate as a fixed-point value (basis points, 1/10000).
///
/// Using integer arithmetic avoids floating-point non-determinism.
/// 10000 = 100%, 100 = 1%, 1 = 0.01%
pub type FeeRateBps = u32;

/// The shared denominator every fee rate is expressed against.
pub const FEE_MULTIPLIER: u32 = 10_000;

/// Largest amount for which a single-bucket fee computation cannot overflow
/// `u128`. Ledgers that cap their total supply at this value make every fee
/// path total.
pub const MAX_SPLITTABLE_AMOUNT: u128 = u128::MAX / FEE_MULTIPLIER as u128;

/// The three transfer fee rates, each a numerator over [`FEE_MULTIPLIER`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeRates {
    /// Portion accumulated by the contract for liquidity provisioning.
    pub liquidity: FeeRateBps,

    /// Portion routed to the production fee wallet.
    pub production: FeeRateBps,

    /// Portion routed to the platform fee wallet.
    pub platform: FeeRateBps,
}

impl FeeRates {
    /// Create a rate set without validating it.
    pub fn new(liquidity: FeeRateBps, production: FeeRateBps, platform: FeeRateBps) -> Self {
        Self {
            liquidity,
            production,
            platform,
        }
    }

    /// A rate set that charges nothing.
    pub fn zero() -> Self {
        Self::new(0, 0, 0)
    }

    /// Sum of the three numerators, widened so it cannot wrap.
    pub fn total_bps(&self) -> u64 {
        self.liquidity as u64 + self.production as u64 + self.platform as u64
    }

    /// A rate set is sane when the combined fee stays at or below 100%.
    /// Above that, every non-exempt transfer would net negative, which the
    /// unsigned arithmetic cannot represent.
    pub fn is_valid(&self) -> bool {
        self.total_bps() <= FEE_MULTIPLIER as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_adds_all_buckets() {
        let rates = FeeRates::new(200, 600, 200);
        assert_eq!(rates.total_bps(), 1_000);
    }

    #[test]
    fn full_multiplier_is_still_valid() {
        assert!(FeeRates::new(5_000, 2_500, 2_500).is_valid());
    }

    #[test]
    fn sum_above_multiplier_is_invalid() {
        assert!(!FeeRates::new(5_000, 5_000, 1).is_valid());
    }

    #[test]
    fn extreme_numerators_do_not_wrap() {
        let rates = FeeRates::new(u32::MAX, u32::MAX, u32::MAX);
        assert_eq!(rates.total_bps(), 3 * u32::MAX as u64);
        assert!(!rates.is_valid());
    }
}
