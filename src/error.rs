//! Error types for ledger operations.
//!
//! Every variant aborts the whole call: a failed `contribute` or `withdraw`
//! leaves the ledger exactly as it was before the call.

use thiserror::Error;

use crate::types::Address;

/// Failure reasons surfaced by [`FundingLedger`](crate::ledger::FundingLedger).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The USD-equivalent of the attached value is below the minimum.
    ///
    /// Both values carry 18 decimals.
    #[error("contribution worth {usd_value} is below the minimum of {minimum} (18 decimals)")]
    InsufficientContribution { usd_value: u128, minimum: u128 },

    /// A caller other than the owner attempted a privileged operation.
    #[error("caller {caller} is not the owner")]
    Unauthorized { caller: Address },

    /// Funder sequence read past its current length.
    #[error("funder index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The oracle reported a zero or negative answer.
    #[error("oracle reported unusable price {0}")]
    InvalidPrice(i128),

    /// Fixed-point arithmetic exceeded `u128`.
    #[error("arithmetic overflow")]
    Overflow,

    /// Moving native value out of the ledger failed.
    #[error(transparent)]
    Transfer(#[from] TransferError),
}

/// Failure reasons for native value movements between accounts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("insufficient funds: needed {needed}, available {available}")]
    InsufficientFunds { needed: u128, available: u128 },

    #[error("account {0} is frozen")]
    Frozen(Address),

    #[error("balance overflow")]
    Overflow,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LedgerError>;
