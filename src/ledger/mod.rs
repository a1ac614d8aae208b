//! Funding ledger module.
//!
//! ## Components
//!
//! - [`FundingLedger`]: contribution map, funder sequence, owner-gated reset
//! - [`LedgerConfig`]: parameters fixed at construction
//! - [`usd_value`] / [`minimum_contribution`]: oracle-priced threshold math
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use funding_ledger::ledger::FundingLedger;
//! use funding_ledger::oracle::MockV3Aggregator;
//! use funding_ledger::types::{amount::to_wei, Address};
//! use funding_ledger::LedgerError;
//!
//! let mut ledger = FundingLedger::new(
//!     Address::from_seed(b"deployer"),
//!     Arc::new(MockV3Aggregator::default()),
//! );
//! let alice = Address::from_seed(b"alice");
//!
//! // $0.40 at $2000 per unit
//! let too_small = ledger.contribute(alice, to_wei("0.0002").unwrap());
//! assert!(matches!(too_small, Err(LedgerError::InsufficientContribution { .. })));
//!
//! // $2
//! ledger.contribute(alice, to_wei("0.001").unwrap()).unwrap();
//! assert_eq!(ledger.address_to_amount(&alice), to_wei("0.001").unwrap());
//! ```

pub mod config;
pub mod conversion;
pub mod funding;

pub use config::{LedgerConfig, MINIMUM_USD};
pub use conversion::{minimum_contribution, usd_value};
pub use funding::{FundingLedger, EMPTY_ROOT};
