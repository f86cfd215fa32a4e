//! Fee exclusion registry.
//!
//! A set of addresses exempt from fee deduction on transfers where they are
//! sender or recipient. Membership is the sole input the fee policy reads
//! from this component; there is no history and no cascading effect.

use std::collections::HashSet;

use crate::address::Address;

/// Addresses exempt from transfer fees.
#[derive(Clone, Debug, Default)]
pub struct FeeExclusions {
    excluded: HashSet<Address>,
}

impl FeeExclusions {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `account` is exempt from fees.
    pub fn is_excluded(&self, account: Address) -> bool {
        self.excluded.contains(&account)
    }

    /// Add or remove `account` from the registry.
    pub fn set_excluded(&mut self, account: Address, excluded: bool) {
        if excluded {
            self.excluded.insert(account);
        } else {
            self.excluded.remove(&account);
        }
    }
}
