//! Fixed-point native amount utilities.
//!
//! ## Overview
//!
//! Native value is counted in the smallest indivisible unit ("wei"), stored
//! as `u128`. One whole native unit is 10^18 wei. USD-equivalent values
//! produced by the ledger carry the same 18 decimals.
//!
//! Human-readable strings are parsed with `rust_decimal` so that "0.001"
//! becomes exactly 10^15 wei. Nothing in this module touches floating point.
//!
//! ## Examples
//!
//! ```
//! use funding_ledger::types::amount::{to_wei, from_wei, WEI_PER_UNIT};
//!
//! assert_eq!(to_wei("1"), Some(WEI_PER_UNIT));
//! assert_eq!(to_wei("0.001"), Some(1_000_000_000_000_000));
//! assert_eq!(from_wei(1_500_000_000_000_000_000), "1.5");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Decimals carried by native amounts and USD values
pub const UNIT_DECIMALS: u32 = 18;

/// Wei per whole native unit: 10^18
pub const WEI_PER_UNIT: u128 = 1_000_000_000_000_000_000;

/// Largest number of decimals `parse_units` accepts.
///
/// `Decimal` holds at most 28 significant digits.
pub const MAX_DECIMALS: u32 = 28;

// ============================================================================
// Parsing
// ============================================================================

/// Parse a decimal string into an integer scaled by `10^decimals`.
///
/// Digits beyond `decimals` are rounded half-even, matching `Decimal::round_dp`.
///
/// # Returns
///
/// * `Some(u128)` - The scaled integer
/// * `None` - If parsing fails, the value is negative, or it overflows
///
/// # Example
///
/// ```
/// use funding_ledger::types::amount::parse_units;
///
/// // An 8-decimal oracle answer of 2000 USD
/// assert_eq!(parse_units("2000", 8), Some(200_000_000_000));
/// ```
pub fn parse_units(s: &str, decimals: u32) -> Option<u128> {
    if decimals > MAX_DECIMALS {
        return None;
    }
    let decimal = Decimal::from_str(s.trim()).ok()?;
    decimal_to_units(decimal, decimals)
}

/// Scale a `Decimal` by `10^decimals` into an unsigned integer.
pub fn decimal_to_units(d: Decimal, decimals: u32) -> Option<u128> {
    if d.is_sign_negative() {
        return None;
    }

    let factor = Decimal::from_i128_with_scale(10i128.checked_pow(decimals)?, 0);
    let scaled = d.checked_mul(factor)?;
    scaled.round_dp(0).to_u128()
}

/// Parse a native amount string into wei.
pub fn to_wei(s: &str) -> Option<u128> {
    parse_units(s, UNIT_DECIMALS)
}

// ============================================================================
// Formatting
// ============================================================================

/// Render a scaled integer with trailing zeros trimmed.
///
/// Exact for the full `u128` range.
///
/// # Example
///
/// ```
/// use funding_ledger::types::amount::format_units;
///
/// assert_eq!(format_units(200_000_000_000, 8), "2000");
/// assert_eq!(format_units(1, 8), "0.00000001");
/// ```
pub fn format_units(value: u128, decimals: u32) -> String {
    if decimals == 0 {
        return value.to_string();
    }
    let Some(scale) = 10u128.checked_pow(decimals) else {
        return value.to_string();
    };

    let whole = value / scale;
    let frac = value % scale;
    if frac == 0 {
        return whole.to_string();
    }

    let frac = format!("{:0width$}", frac, width = decimals as usize);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

/// Render wei as whole native units.
pub fn from_wei(wei: u128) -> String {
    format_units(wei, UNIT_DECIMALS)
}

/// Render an 18-decimal USD value with a currency prefix.
pub fn format_usd(usd: u128) -> String {
    format!("${}", format_units(usd, UNIT_DECIMALS))
}

// ============================================================================
// Unit Tests
// ============================================================================
