//! Price oracle capability consumed by the ledger.
//!
//! The ledger never owns or updates a feed. It holds a shared, read-only
//! handle and queries it once per contribution. Whatever price is current
//! at call time is used; there is no staleness check.
//!
//! ## Example
//!
//! ```
//! use funding_ledger::oracle::{MockV3Aggregator, PriceFeed};
//!
//! let feed = MockV3Aggregator::default();
//! let data = feed.latest_price();
//! assert_eq!(data.decimals, 8);
//! assert_eq!(data.price, 2_000_00000000);
//! ```

pub mod mock;

pub use mock::{MockV3Aggregator, RoundData, DECIMALS, INITIAL_ANSWER};

use crate::types::Address;

/// A price answer with its declared decimal exponent.
///
/// `price / 10^decimals` is the value of one whole native unit in the
/// reference currency. The answer is signed, as aggregator answers are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceData {
    pub price: i128,
    pub decimals: u8,
}

/// Read-only price source.
pub trait PriceFeed: Send + Sync {
    /// Current answer. Called once per contribution.
    fn latest_price(&self) -> PriceData;

    /// Address the feed is reachable at.
    fn address(&self) -> Address;
}
