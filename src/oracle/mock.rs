//! In-process aggregator used on local networks and in tests.
//!
//! Mirrors the shape of a V3 aggregator: a fixed decimal exponent, a signed
//! answer, and a round counter bumped on every update.

use parking_lot::RwLock;

use crate::oracle::{PriceData, PriceFeed};
use crate::types::Address;

/// Decimals reported by the default mock feed
pub const DECIMALS: u8 = 8;

/// Default answer: 2000 reference units per native unit, at 8 decimals
pub const INITIAL_ANSWER: i128 = 2_000_00000000;

/// One published round of the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundData {
    pub round_id: u64,
    pub answer: i128,
}

/// Mock V3 aggregator.
///
/// The answer lives behind a lock so tests can move the price while a
/// ledger holds a shared handle to the same feed.
#[derive(Debug)]
pub struct MockV3Aggregator {
    address: Address,
    decimals: u8,
    round: RwLock<RoundData>,
}

impl Default for MockV3Aggregator {
    fn default() -> Self {
        Self::new(DECIMALS, INITIAL_ANSWER)
    }
}

impl MockV3Aggregator {
    /// Create a feed publishing `initial_answer` as round 1.
    pub fn new(decimals: u8, initial_answer: i128) -> Self {
        Self::with_address(
            Address::from_seed(b"MockV3Aggregator"),
            decimals,
            initial_answer,
        )
    }

    /// Create a feed at an explicit address.
    pub fn with_address(address: Address, decimals: u8, initial_answer: i128) -> Self {
        Self {
            address,
            decimals,
            round: RwLock::new(RoundData {
                round_id: 1,
                answer: initial_answer,
            }),
        }
    }

    /// Publish a new answer as the next round.
    pub fn update_answer(&self, answer: i128) {
        let mut round = self.round.write();
        round.round_id += 1;
        round.answer = answer;
        tracing::debug!(round_id = round.round_id, answer, "mock feed updated");
    }

    /// Latest published round
    pub fn latest_round_data(&self) -> RoundData {
        *self.round.read()
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }
}

impl PriceFeed for MockV3Aggregator {
    fn latest_price(&self) -> PriceData {
        PriceData {
            price: self.round.read().answer,
            decimals: self.decimals,
        }
    }

    fn address(&self) -> Address {
        self.address
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
