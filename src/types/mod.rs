//! Core data types for the funding ledger
//!
//! ## Types
//!
//! - [`Address`]: Account identity (owner, contributors, feeds)
//! - [`ContributionReceipt`]: Result of an accepted contribution
//! - [`WithdrawalReceipt`]: Result of an owner withdrawal
//!
//! ## Fixed-Point Arithmetic
//!
//! Native amounts are `u128` wei (10^18 per unit); see [`amount`].

mod address;
mod receipt;
pub mod amount;

pub use address::{Address, ParseAddressError, ADDRESS_LEN};
pub use receipt::{compute_hash, ContributionReceipt, WithdrawalReceipt};
