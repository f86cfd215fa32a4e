//! Transfer-path behavior: fee application, exemptions, allowance
//! discipline and conservation of supply.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ouro_fees::FeeRates;
use ouro_token::{Address, FeeWallets, FixedRateRouter, Token, TokenConfig, TokenError};

const SUPPLY: u128 = 1_000_000;

fn addr(tag: u8) -> Address {
    Address::new([tag; 20])
}

fn owner() -> Address {
    addr(0x01)
}

fn contract() -> Address {
    addr(0xcc)
}

fn wallets() -> FeeWallets {
    FeeWallets {
        liquidity: addr(0xa1),
        production: addr(0xa2),
        platform: addr(0xa3),
    }
}

/// Token with the reference 2%/6%/2% rates and a threshold high enough that
/// swap-and-liquify never arms in these tests.
fn deploy() -> Token {
    let config = TokenConfig {
        fees: FeeRates::new(200, 600, 200),
        wallets: wallets(),
        liquify_threshold: SUPPLY + 1,
        swap_deadline_secs: 300,
    };
    Token::initialize(contract(), owner(), SUPPLY, config).unwrap()
}

fn router() -> FixedRateRouter {
    FixedRateRouter::one_to_one(addr(0xee))
}

/// Sum every balance this suite can create, including fee destinations and
/// the pool account.
fn sum_universe(token: &Token, users: &[Address]) -> u128 {
    let mut accounts = vec![
        owner(),
        contract(),
        wallets().liquidity,
        wallets().production,
        wallets().platform,
        addr(0xee),
    ];
    accounts.extend_from_slice(users);
    accounts.iter().map(|a| token.balance_of(*a)).sum()
}

#[test]
fn owner_transfers_without_fee() {
    let mut token = deploy();
    let mut router = router();

    token.transfer(owner(), addr(0x10), 100, &mut router).unwrap();

    assert_eq!(token.balance_of(addr(0x10)), 100);
    assert_eq!(token.balance_of(contract()), 0);
    assert_eq!(token.balance_of(wallets().production), 0);
}

#[test]
fn non_excluded_transfer_pays_the_2_6_2_split() {
    let mut token = deploy();
    let mut router = router();
    let (alice, bob) = (addr(0x10), addr(0x11));

    token.transfer(owner(), alice, 100, &mut router).unwrap();
    token.transfer(alice, bob, 100, &mut router).unwrap();

    assert_eq!(token.balance_of(bob), 90);
    assert_eq!(token.balance_of(alice), 0);
    assert_eq!(token.balance_of(contract()), 2);
    assert_eq!(token.balance_of(wallets().production), 6);
    assert_eq!(token.balance_of(wallets().platform), 2);
}

#[test]
fn excluded_recipient_receives_whole_amount() {
    let mut token = deploy();
    let mut router = router();
    let (alice, bob) = (addr(0x10), addr(0x11));

    token.transfer(owner(), alice, 500, &mut router).unwrap();
    token.set_fee_exclusion(owner(), bob, true).unwrap();
    token.transfer(alice, bob, 500, &mut router).unwrap();

    assert_eq!(token.balance_of(bob), 500);
    assert_eq!(token.balance_of(contract()), 0);
    assert_eq!(token.balance_of(wallets().production), 0);
    assert_eq!(token.balance_of(wallets().platform), 0);
}

#[test]
fn exclusion_can_be_revoked() {
    let mut token = deploy();
    let mut router = router();
    let (alice, bob) = (addr(0x10), addr(0x11));

    token.transfer(owner(), alice, 200, &mut router).unwrap();
    token.set_fee_exclusion(owner(), alice, true).unwrap();
    token.transfer(alice, bob, 100, &mut router).unwrap();
    assert_eq!(token.balance_of(bob), 100);

    token.set_fee_exclusion(owner(), alice, false).unwrap();
    token.transfer(alice, bob, 100, &mut router).unwrap();
    assert_eq!(token.balance_of(bob), 190);
}

#[test]
fn insufficient_balance_leaves_everything_unchanged() {
    let mut token = deploy();
    let mut router = router();
    let (alice, bob) = (addr(0x10), addr(0x11));

    token.transfer(owner(), alice, 50, &mut router).unwrap();
    let err = token.transfer(alice, bob, 51, &mut router).unwrap_err();

    assert_eq!(
        err,
        TokenError::InsufficientBalance {
            available: 50,
            requested: 51
        }
    );
    assert_eq!(token.balance_of(alice), 50);
    assert_eq!(token.balance_of(bob), 0);
    assert_eq!(token.balance_of(contract()), 0);
}

#[test]
fn delegated_transfer_spends_allowance_and_pays_fees() {
    let mut token = deploy();
    let mut router = router();
    let (alice, bob, carol) = (addr(0x10), addr(0x11), addr(0x12));

    token.transfer(owner(), alice, 1_000, &mut router).unwrap();
    token.approve(alice, bob, 300);
    token
        .transfer_from(bob, alice, carol, 200, &mut router)
        .unwrap();

    assert_eq!(token.allowance(alice, bob), 100);
    assert_eq!(token.balance_of(carol), 180);
    assert_eq!(token.balance_of(alice), 800);
    assert_eq!(token.balance_of(contract()), 4);
    assert_eq!(token.balance_of(wallets().production), 12);
    assert_eq!(token.balance_of(wallets().platform), 4);
}

#[test]
fn delegated_transfer_beyond_allowance_fails_cleanly() {
    let mut token = deploy();
    let mut router = router();
    let (alice, bob, carol) = (addr(0x10), addr(0x11), addr(0x12));

    token.transfer(owner(), alice, 1_000, &mut router).unwrap();
    token.approve(alice, bob, 100);

    let err = token
        .transfer_from(bob, alice, carol, 101, &mut router)
        .unwrap_err();
    assert_eq!(
        err,
        TokenError::InsufficientAllowance {
            allowed: 100,
            requested: 101
        }
    );
    assert_eq!(token.allowance(alice, bob), 100);
    assert_eq!(token.balance_of(alice), 1_000);
    assert_eq!(token.balance_of(carol), 0);
}

#[test]
fn fee_change_applies_to_the_next_transfer_only() {
    let mut token = deploy();
    let mut router = router();
    let (alice, bob) = (addr(0x10), addr(0x11));

    token.transfer(owner(), alice, 400, &mut router).unwrap();
    token.transfer(alice, bob, 100, &mut router).unwrap();
    assert_eq!(token.balance_of(bob), 90);

    // Double every rate: 4%/12%/4%, 20% total.
    token.change_fees(owner(), 400, 1_200, 400).unwrap();
    token.transfer(alice, bob, 100, &mut router).unwrap();
    assert_eq!(token.balance_of(bob), 90 + 80);

    // Settled balances were not restated by the change.
    assert_eq!(token.balance_of(wallets().production), 6 + 12);
}

#[test]
fn wallet_change_redirects_subsequent_fees() {
    let mut token = deploy();
    let mut router = router();
    let (alice, bob) = (addr(0x10), addr(0x11));
    let (new_liq, new_prod, new_plat) = (addr(0xb1), addr(0xb2), addr(0xb3));

    token.transfer(owner(), alice, 400, &mut router).unwrap();
    token
        .change_wallets(owner(), new_liq, new_prod, new_plat)
        .unwrap();
    token.transfer(alice, bob, 100, &mut router).unwrap();

    assert_eq!(token.balance_of(new_prod), 6);
    assert_eq!(token.balance_of(new_plat), 2);
    assert_eq!(token.balance_of(wallets().production), 0);
    // The liquidity part still accumulates on the contract account.
    assert_eq!(token.balance_of(contract()), 2);
}

#[test]
fn supply_is_conserved_under_random_transfer_sequences() {
    let mut token = deploy();
    let mut router = router();
    let mut rng = StdRng::seed_from_u64(0x0f2e_71aa);

    let users: Vec<Address> = (0x10..0x18).map(addr).collect();
    for user in &users {
        token.transfer(owner(), *user, 20_000, &mut router).unwrap();
    }

    for _ in 0..500 {
        let from = users[rng.gen_range(0..users.len())];
        let to = users[rng.gen_range(0..users.len())];
        let amount = rng.gen_range(0..5_000u128);
        // Overdrafts are expected along the way; they must not move funds.
        let _ = token.transfer(from, to, amount, &mut router);

        assert_eq!(sum_universe(&token, &users), SUPPLY);
    }

    assert_eq!(token.total_supply(), SUPPLY);
}
