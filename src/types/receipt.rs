//! Receipts returned by successful ledger calls.
//!
//! Each receipt captures the call's effect together with the ledger state
//! root after the call, so callers can verify the resulting state without
//! re-reading the whole ledger.

use sha2::{Digest, Sha256};
use ssz_rs::prelude::*;

use crate::types::address::{Address, ADDRESS_LEN};

/// Compute SHA-256 of the given data
///
/// Returns a 32-byte array suitable for use as a state root.
pub fn compute_hash(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();

    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

// ============================================================================
// ContributionReceipt
// ============================================================================

/// Summary of an accepted contribution.
///
/// ## SSZ Layout
///
/// Fixed-size container: 20 + 16 + 16 + 16 + 8 + 32 = 108 bytes.
///
/// ## Example
///
/// ```
/// use funding_ledger::types::{Address, ContributionReceipt};
///
/// let receipt = ContributionReceipt::new(
///     Address::from_seed(b"alice"),
///     1_000_000_000_000_000,      // value: 0.001
///     2_000_000_000_000_000_000,  // usd_value: $2
///     1_000_000_000_000_000,      // sender_total
///     0,                          // funder_index
///     [0u8; 32],                  // state_root
/// );
/// assert_eq!(receipt.sender(), Address::from_seed(b"alice"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct ContributionReceipt {
    /// Contributor address bytes
    pub sender_raw: [u8; ADDRESS_LEN],

    /// Attached value in wei
    pub value: u128,

    /// USD-equivalent of `value` at call time (18 decimals)
    pub usd_value: u128,

    /// Sender's cumulative contribution after this call
    pub sender_total: u128,

    /// Position of this contribution in the funder sequence
    pub funder_index: u64,

    /// Ledger state root after the call
    pub state_root: [u8; 32],
}

impl ContributionReceipt {
    pub fn new(
        sender: Address,
        value: u128,
        usd_value: u128,
        sender_total: u128,
        funder_index: u64,
        state_root: [u8; 32],
    ) -> Self {
        Self {
            sender_raw: sender.to_bytes(),
            value,
            usd_value,
            sender_total,
            funder_index,
            state_root,
        }
    }

    /// Get the contributor
    pub fn sender(&self) -> Address {
        Address::new(self.sender_raw)
    }

    /// Get the state root as a hex string
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root)
    }
}

// ============================================================================
// WithdrawalReceipt
// ============================================================================

/// Summary of an owner withdrawal.
///
/// `state_root` is always the root of an empty ledger, since a withdrawal
/// resets every entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct WithdrawalReceipt {
    /// Owner address bytes (the recipient)
    pub owner_raw: [u8; ADDRESS_LEN],

    /// Wei transferred to the owner
    pub amount: u128,

    /// Length of the funder sequence before the reset
    pub funders_cleared: u64,

    /// Ledger state root after the reset
    pub state_root: [u8; 32],
}

impl WithdrawalReceipt {
    pub fn new(owner: Address, amount: u128, funders_cleared: u64, state_root: [u8; 32]) -> Self {
        Self {
            owner_raw: owner.to_bytes(),
            amount,
            funders_cleared,
            state_root,
        }
    }

    /// Get the recipient
    pub fn owner(&self) -> Address {
        Address::new(self.owner_raw)
    }

    /// Get the state root as a hex string
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root)
    }

    /// Check if nothing was held at withdrawal time
    pub fn is_empty(&self) -> bool {
        self.amount == 0
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
