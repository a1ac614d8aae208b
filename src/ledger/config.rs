//! Ledger construction parameters.

use crate::types::amount::WEI_PER_UNIT;

/// Default USD floor: one reference-currency unit, 18 decimals
pub const MINIMUM_USD: u128 = WEI_PER_UNIT;

/// Parameters fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Minimum USD-equivalent per contribution (18 decimals)
    pub minimum_usd: u128,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            minimum_usd: MINIMUM_USD,
        }
    }
}

impl LedgerConfig {
    pub fn with_minimum_usd(minimum_usd: u128) -> Self {
        Self { minimum_usd }
    }
}
