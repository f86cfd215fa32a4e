//! Balance and allowance bookkeeping.
//!
//! The ledger is the foundation every other component reads and writes
//! through. Total supply is fixed at construction; transfers only ever move
//! value between accounts, so the sum of all balances equals the total
//! supply at all times.

use std::collections::HashMap;

use crate::address::Address;
use crate::error::{TokenError, TokenResult};

/// Account balances and spending allowances for a fixed-supply token.
#[derive(Clone, Debug)]
pub struct Ledger {
    /// Balance per account, in the token's smallest unit.
    balances: HashMap<Address, u128>,

    /// Granted allowance per (owner, spender) pair.
    allowances: HashMap<(Address, Address), u128>,

    /// Fixed at construction; never changes afterwards.
    total_supply: u128,
}

impl Ledger {
    /// Create a ledger with the entire supply credited to `holder`.
    pub fn with_initial_supply(holder: Address, total_supply: u128) -> Self {
        let mut balances = HashMap::new();
        balances.insert(holder, total_supply);
        Self {
            balances,
            allowances: HashMap::new(),
            total_supply,
        }
    }

    /// The fixed total supply.
    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Balance of an account; unknown accounts hold zero.
    pub fn balance_of(&self, account: Address) -> u128 {
        self.balances.get(&account).copied().unwrap_or(0)
    }

    /// Allowance granted by `owner` to `spender`; ungranted pairs are zero.
    pub fn allowance(&self, owner: Address, spender: Address) -> u128 {
        self.allowances.get(&(owner, spender)).copied().unwrap_or(0)
    }

    /// Set an allowance unconditionally. Overwrite semantics: the previous
    /// grant is discarded, last write wins.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: u128) {
        self.allowances.insert((owner, spender), amount);
    }

    /// Decrement an allowance, failing without mutation if the grant is
    /// smaller than `amount`. An allowance is never driven negative.
    pub fn spend_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        amount: u128,
    ) -> TokenResult<()> {
        let allowed = self.allowance(owner, spender);
        if allowed < amount {
            return Err(TokenError::InsufficientAllowance {
                allowed,
                requested: amount,
            });
        }
        self.allowances.insert((owner, spender), allowed - amount);
        Ok(())
    }

    /// Move `amount` from `from` to `to`, failing without mutation if the
    /// sender's balance is short. The check precedes every write, so a
    /// failed move is never partially applied.
    pub fn move_balance(&mut self, from: Address, to: Address, amount: u128) -> TokenResult<()> {
        let available = self.balance_of(from);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                available,
                requested: amount,
            });
        }

        self.balances.insert(from, available - amount);
        let to_balance = self.balance_of(to);
        self.balances.insert(to, to_balance + amount);

        Ok(())
    }

    /// Sum of every account balance. Diagnostic; conservation tests assert
    /// this equals [`Ledger::total_supply`] after arbitrary activity.
    pub fn sum_of_balances(&self) -> u128 {
        self.balances.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(tag: u8) -> Address {
        Address::new([tag; 20])
    }

    #[test]
    fn initial_supply_goes_to_holder() {
        let ledger = Ledger::with_initial_supply(addr(1), 1_000);
        assert_eq!(ledger.total_supply(), 1_000);
        assert_eq!(ledger.balance_of(addr(1)), 1_000);
        assert_eq!(ledger.balance_of(addr(2)), 0);
    }

    #[test]
    fn move_balance_debits_and_credits() {
        let mut ledger = Ledger::with_initial_supply(addr(1), 1_000);
        ledger.move_balance(addr(1), addr(2), 400).unwrap();

        assert_eq!(ledger.balance_of(addr(1)), 600);
        assert_eq!(ledger.balance_of(addr(2)), 400);
        assert_eq!(ledger.sum_of_balances(), 1_000);
    }

    #[test]
    fn move_to_self_is_a_no_op() {
        let mut ledger = Ledger::with_initial_supply(addr(1), 1_000);
        ledger.move_balance(addr(1), addr(1), 700).unwrap();
        assert_eq!(ledger.balance_of(addr(1)), 1_000);
    }

    #[test]
    fn overdraft_fails_without_mutation() {
        let mut ledger = Ledger::with_initial_supply(addr(1), 100);
        let err = ledger.move_balance(addr(1), addr(2), 101).unwrap_err();

        assert_eq!(
            err,
            TokenError::InsufficientBalance {
                available: 100,
                requested: 101
            }
        );
        assert_eq!(ledger.balance_of(addr(1)), 100);
        assert_eq!(ledger.balance_of(addr(2)), 0);
    }

    #[test]
    fn approve_overwrites() {
        let mut ledger = Ledger::with_initial_supply(addr(1), 100);
        ledger.approve(addr(1), addr(2), 50);
        ledger.approve(addr(1), addr(2), 10);
        assert_eq!(ledger.allowance(addr(1), addr(2)), 10);
    }

    #[test]
    fn spend_allowance_decrements() {
        let mut ledger = Ledger::with_initial_supply(addr(1), 100);
        ledger.approve(addr(1), addr(2), 50);
        ledger.spend_allowance(addr(1), addr(2), 20).unwrap();
        assert_eq!(ledger.allowance(addr(1), addr(2)), 30);
    }

    #[test]
    fn spend_allowance_never_goes_negative() {
        let mut ledger = Ledger::with_initial_supply(addr(1), 100);
        ledger.approve(addr(1), addr(2), 10);

        let err = ledger.spend_allowance(addr(1), addr(2), 11).unwrap_err();
        assert_eq!(
            err,
            TokenError::InsufficientAllowance {
                allowed: 10,
                requested: 11
            }
        );
        assert_eq!(ledger.allowance(addr(1), addr(2)), 10);
    }
}
