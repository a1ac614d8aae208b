//! Account identity used for owners, contributors and feeds.
//!
//! Addresses are 20 raw bytes rendered as `0x`-prefixed lowercase hex.

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};

/// Length of an address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// A 20-byte account identifier.
///
/// ## Example
///
/// ```
/// use funding_ledger::types::Address;
///
/// let owner: Address = "0x00000000000000000000000000000000000000aa".parse().unwrap();
/// assert_eq!(owner.to_string(), "0x00000000000000000000000000000000000000aa");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The all-zero address
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    /// Wrap raw bytes
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Derive a deterministic address from an arbitrary seed.
    ///
    /// The address is the trailing 20 bytes of `SHA-256(seed)`. The same seed
    /// always yields the same address, which makes it convenient for
    /// generating named test accounts.
    pub fn from_seed(seed: &[u8]) -> Self {
        let digest = Sha256::digest(seed);
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&digest[digest.len() - ADDRESS_LEN..]);
        Self(bytes)
    }

    /// Derive the `index`-th account of a labelled family, e.g. `("signer", 3)`.
    pub fn derive(label: &str, index: u64) -> Self {
        let mut seed = Vec::with_capacity(label.len() + 8);
        seed.extend_from_slice(label.as_bytes());
        seed.extend_from_slice(&index.to_le_bytes());
        Self::from_seed(&seed)
    }

    /// Raw byte view
    #[inline]
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Copy out the raw bytes
    #[inline]
    pub fn to_bytes(self) -> [u8; ADDRESS_LEN] {
        self.0
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

/// Error returned when parsing an [`Address`] from a string.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseAddressError {
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("expected 20 bytes, got {0}")]
    Length(usize),
}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let raw = hex::decode(digits)?;
        let bytes: [u8; ADDRESS_LEN] = raw
            .as_slice()
            .try_into()
            .map_err(|_| ParseAddressError::Length(raw.len()))?;
        Ok(Self(bytes))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_prefixed_hex() {
        let addr = Address::new([0xAB; ADDRESS_LEN]);
        let s = addr.to_string();
        assert!(s.starts_with("0x"));
        assert_eq!(s.len(), 2 + ADDRESS_LEN * 2);
    }

    #[test]
    fn test_parse_with_and_without_prefix() {
        let with: Address = "0x0102030405060708090a0b0c0d0e0f1011121314".parse().unwrap();
        let without: Address = "0102030405060708090a0b0c0d0e0f1011121314".parse().unwrap();
        assert_eq!(with, without);
        assert_eq!(with.as_bytes()[0], 0x01);
        assert_eq!(with.as_bytes()[19], 0x14);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!("0xzz".parse::<Address>(), Err(ParseAddressError::Hex(_))));
        assert_eq!("0x0102".parse::<Address>(), Err(ParseAddressError::Length(2)));
    }

    #[test]
    fn test_from_seed_is_deterministic() {
        assert_eq!(Address::from_seed(b"deployer"), Address::from_seed(b"deployer"));
        assert_ne!(Address::from_seed(b"deployer"), Address::from_seed(b"attacker"));
    }

    #[test]
    fn test_derive_distinct_indices() {
        let a = Address::derive("signer", 1);
        let b = Address::derive("signer", 2);
        assert_ne!(a, b);
        assert_ne!(a, Address::ZERO);
    }
}
