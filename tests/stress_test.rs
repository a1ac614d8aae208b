//! Stress tests for the funding ledger.
//!
//! These tests verify:
//! 1. Accounting invariants hold across many random contributions
//! 2. Determinism is preserved across runs
//! 3. Rejected calls never leak into state
//!
//! ## Running Stress Tests
//!
//! ```bash
//! cargo test --release --test stress_test -- --nocapture
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use funding_ledger::types::amount::{from_wei, WEI_PER_UNIT};
use funding_ledger::{Address, FundingLedger, LedgerError, MockV3Aggregator, Wallets};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Number of contribution attempts per run
const STRESS_CALL_COUNT: usize = 20_000;

/// Size of the signer pool (forces repeat contributors)
const SIGNER_COUNT: u64 = 500;

/// Minimum accepted at $2000/unit with a $1 floor: 0.0005 units
const MIN_WEI: u128 = WEI_PER_UNIT / 2000;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Generate deterministic (signer, value) pairs.
///
/// Roughly a quarter of the values fall below the minimum.
fn generate_calls(count: usize, seed: u64) -> Vec<(Address, u128)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let signer = Address::derive("signer", rng.gen_range(1..=SIGNER_COUNT));
            let value = rng.gen_range(MIN_WEI / 3..=MIN_WEI * 3);
            (signer, value)
        })
        .collect()
}

fn deploy() -> (FundingLedger, Address) {
    let deployer = Address::derive("signer", 0);
    let ledger = FundingLedger::new(deployer, Arc::new(MockV3Aggregator::default()));
    (ledger, deployer)
}

/// Run a call sequence and return the final state root.
fn run_deterministic_sequence(seed: u64, count: usize) -> [u8; 32] {
    let (mut ledger, _) = deploy();
    for (signer, value) in generate_calls(count, seed) {
        let _ = ledger.contribute(signer, value);
    }
    ledger.state_root()
}

// ============================================================================
// STRESS TESTS
// ============================================================================

/// Every accepted call is reflected exactly once; every rejected call is not.
#[test]
fn stress_accounting_invariants() {
    println!("\n=== STRESS TEST: Accounting Invariants ===\n");

    let calls = generate_calls(STRESS_CALL_COUNT, 42);
    let (mut ledger, deployer) = deploy();

    let mut expected: HashMap<Address, u128> = HashMap::new();
    let mut expected_sequence = Vec::new();
    let mut rejected = 0usize;

    let start = Instant::now();
    for (signer, value) in calls {
        match ledger.contribute(signer, value) {
            Ok(receipt) => {
                assert!(value >= MIN_WEI);
                *expected.entry(signer).or_insert(0) += value;
                expected_sequence.push(signer);
                assert_eq!(receipt.sender_total, expected[&signer]);
            }
            Err(LedgerError::InsufficientContribution { .. }) => {
                assert!(value < MIN_WEI);
                rejected += 1;
            }
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    let elapsed = start.elapsed();

    println!("  Calls:             {:>12}", STRESS_CALL_COUNT);
    println!("  Rejected:          {:>12}", rejected);
    println!("  Distinct funders:  {:>12}", expected.len());
    println!("  Held:              {:>12}", from_wei(ledger.balance()));
    println!("  Elapsed time:      {:>12.2?}", elapsed);

    assert!(rejected > 0, "expected some rejections");
    assert_eq!(ledger.funders(), expected_sequence.as_slice());
    assert_eq!(ledger.balance(), expected.values().sum::<u128>());
    assert_eq!(ledger.balance(), ledger.total_contributed());
    for (signer, amount) in &expected {
        assert_eq!(ledger.address_to_amount(signer), *amount);
    }

    // Sequence membership matches nonzero entries
    for i in 1..=SIGNER_COUNT {
        let signer = Address::derive("signer", i);
        assert_eq!(
            ledger.funders().contains(&signer),
            ledger.address_to_amount(&signer) > 0
        );
    }

    let mut wallets = Wallets::new();
    let held = ledger.balance();
    let receipt = wallets.withdraw(&mut ledger, deployer).unwrap();

    assert_eq!(receipt.amount, held);
    assert_eq!(receipt.funders_cleared as usize, expected_sequence.len());
    assert_eq!(wallets.balance_of(&deployer), held);
    assert_eq!(ledger.total_contributed(), 0);
    for signer in expected.keys() {
        assert_eq!(ledger.address_to_amount(signer), 0);
    }

    println!("\n=== ACCOUNTING INVARIANTS PASSED ===\n");
}

/// Same sequence produces identical state root.
#[test]
fn verify_determinism() {
    const TEST_COUNT: usize = 5_000;
    const SEED: u64 = 12345;

    let root1 = run_deterministic_sequence(SEED, TEST_COUNT);
    let root2 = run_deterministic_sequence(SEED, TEST_COUNT);
    assert_eq!(root1, root2, "State roots must match for determinism");

    let root3 = run_deterministic_sequence(SEED + 1, TEST_COUNT);
    assert_ne!(root1, root3, "Different seeds should produce different roots");
}

/// Interleaved unauthorized withdrawals never disturb state.
#[test]
fn stress_unauthorized_withdrawals() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let (mut ledger, deployer) = deploy();
    let mut wallets = Wallets::new();

    for (signer, value) in generate_calls(2_000, 7) {
        let _ = ledger.contribute(signer, value);

        if rng.gen_bool(0.1) {
            let attacker = Address::derive("signer", rng.gen_range(1..=SIGNER_COUNT));
            let balance = ledger.balance();
            let root = ledger.state_root();

            let result = wallets.withdraw(&mut ledger, attacker);

            assert_eq!(result, Err(LedgerError::Unauthorized { caller: attacker }));
            assert_eq!(ledger.balance(), balance);
            assert_eq!(ledger.state_root(), root);
        }
    }

    assert_eq!(wallets.balance_of(&deployer), 0);
    let held = ledger.balance();
    wallets.withdraw(&mut ledger, deployer).unwrap();
    assert_eq!(wallets.balance_of(&deployer), held);
}
