//! Swap-and-liquify: converting accumulated liquidity-fee tokens into a
//! token/base-asset liquidity position.
//!
//! The routine is a two-state machine (idle / swapping) guarded by the
//! token's `swap_in_progress` flag. The flag is held by a scoped guard and
//! cleared in `Drop`, so every exit path — early return, router failure,
//! even a panic inside a router call — releases it. A failed cycle never
//! fails the enclosing transfer: the fee tokens stay held for a future
//! attempt.
//!
//! ## Cycle
//!
//! 1. Split the contract's held token balance in half (floor).
//! 2. Swap the first half for base asset via the router, no minimum out.
//! 3. Pair the second half with the proceeds via add-liquidity, minting the
//!    position to the liquidity wallet.
//! 4. Base asset the pool did not consume stays on the contract for manual
//!    sweep; tokens the pool did not consume stay on the contract's ledger
//!    account.
//!
//! Tokens consumed by the router are mirrored onto the pair's ledger
//! account, keeping the sum of balances equal to the total supply.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{info, warn};

use crate::contract::Token;
use crate::router::SwapRouter;

/// Seconds since the Unix epoch; the base for router deadlines.
fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Scoped hold on the token's swap-in-progress flag.
///
/// Acquiring fails while another cycle holds the flag. The flag is cleared
/// when the guard drops, on every exit path.
pub(crate) struct SwapGuard<'a> {
    token: &'a mut Token,
}

impl<'a> SwapGuard<'a> {
    pub(crate) fn try_acquire(token: &'a mut Token) -> Option<Self> {
        if token.swap_in_progress {
            return None;
        }
        token.swap_in_progress = true;
        Some(Self { token })
    }
}

impl Drop for SwapGuard<'_> {
    fn drop(&mut self) {
        self.token.swap_in_progress = false;
    }
}

impl Token {
    /// Run a swap-and-liquify cycle if the contract's held balance has
    /// reached the threshold and no cycle is already in progress.
    ///
    /// Callers are expected to skip this entirely for transfers originating
    /// from the contract's own account.
    pub(crate) fn maybe_swap_and_liquify(&mut self, router: &mut dyn SwapRouter) {
        if self.ledger.balance_of(self.address) < self.config.liquify_threshold {
            return;
        }
        let Some(guard) = SwapGuard::try_acquire(self) else {
            return;
        };
        run_cycle(guard, router);
    }
}

/// The body of one cycle. Consumes the guard; dropping it releases the flag.
fn run_cycle(guard: SwapGuard<'_>, router: &mut dyn SwapRouter) {
    // Reborrow; the guard stays alive to the end of the function, so the
    // flag is released after the last ledger write no matter how we exit.
    let token = &mut *guard.token;
    let held = token.ledger.balance_of(token.address);
    let swap_half = held / 2;
    let pair_half = held - swap_half;
    if swap_half == 0 {
        return;
    }

    let deadline = unix_now() + token.config.swap_deadline_secs;
    let pair = router.pair_address();

    let proceeds = match router.swap_exact_tokens_for_base(swap_half, token.address, deadline) {
        Ok(proceeds) => proceeds,
        Err(err) => {
            warn!(%err, amount = swap_half, "swap step failed; retaining fee tokens");
            return;
        }
    };
    if let Err(err) = token.ledger.move_balance(token.address, pair, swap_half) {
        // The swap already happened; its proceeds must not be dropped.
        token.held_base += proceeds;
        warn!(%err, "could not settle swapped tokens to the pair account");
        return;
    }

    let outcome = match router.add_liquidity_base(
        pair_half,
        proceeds,
        0,
        0,
        token.config.wallets.liquidity,
        deadline,
    ) {
        Ok(outcome) => outcome,
        Err(err) => {
            // The swap proceeds are already ours; hold them for sweep
            // alongside any earlier change.
            token.held_base += proceeds;
            warn!(%err, proceeds, "liquidity step failed; retaining base asset");
            return;
        }
    };

    let token_used = outcome.token_used.min(pair_half);
    let base_used = outcome.base_used.min(proceeds);
    // Credit the change before the fallible ledger move so an early return
    // cannot lose base-asset accounting.
    token.held_base += proceeds - base_used;
    if let Err(err) = token.ledger.move_balance(token.address, pair, token_used) {
        warn!(%err, "could not settle paired tokens to the pair account");
        return;
    }

    info!(
        swapped = swap_half,
        paired = token_used,
        base_used,
        minted = outcome.liquidity_minted,
        change = proceeds - base_used,
        "swap-and-liquify cycle complete"
    );
}
