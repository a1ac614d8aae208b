//! # Funding Ledger
//!
//! An owner-withdrawable contribution ledger gated by an oracle-priced USD
//! minimum.
//!
//! ## Architecture
//!
//! - **Types**: Core data structures (Address, amounts, receipts)
//! - **Oracle**: Read-only price feed capability and a mock aggregator
//! - **Ledger**: Contribution map + funder sequence + owner-gated reset
//! - **Wallets**: Native balances around the ledger
//!
//! ## Design Principles
//!
//! 1. **All-or-nothing**: Every call validates first and commits last
//! 2. **No Floating Point**: Threshold math is checked `u128` at the oracle's exponent
//! 3. **Single Owner**: Only the deploying identity can withdraw
//! 4. **Determinism**: Identical call histories give identical state roots

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Address, amounts, receipts
pub mod types;

/// Price feed capability
pub mod oracle;

/// Funding ledger state machine
pub mod ledger;

/// Native balances and value sinks
pub mod wallets;

/// Error types
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use error::{LedgerError, TransferError};
pub use ledger::{FundingLedger, LedgerConfig};
pub use oracle::{MockV3Aggregator, PriceData, PriceFeed};
pub use types::{Address, ContributionReceipt, WithdrawalReceipt};
pub use wallets::{ValueSink, Wallets};
