//! Native-to-USD conversion at the oracle's declared exponent.
//!
//! ```text
//! usd = amount * price / 10^decimals
//! ```
//!
//! `amount` carries 18 decimals, so `usd` does too. The product is taken in
//! `BigUint`, so an 18-decimal feed never overflows on an ordinary amount.
//! Results are floored, which makes the threshold boundary exact and
//! identical on every machine.

use num_bigint::BigUint;

use crate::error::{LedgerError, Result};
use crate::oracle::PriceData;

/// USD-equivalent of `amount` wei at the given price (18 decimals).
///
/// Saturates at `u128::MAX`. Any minimum is a `u128`, so a saturated value
/// still compares correctly against it.
///
/// # Errors
///
/// * `InvalidPrice` - the answer is zero or negative
///
/// # Example
///
/// ```
/// use funding_ledger::ledger::usd_value;
/// use funding_ledger::oracle::PriceData;
///
/// let data = PriceData { price: 2_000_00000000, decimals: 8 };
/// // 0.001 units at $2000 = $2
/// assert_eq!(usd_value(1_000_000_000_000_000, data).unwrap(), 2_000_000_000_000_000_000);
/// ```
pub fn usd_value(amount: u128, data: PriceData) -> Result<u128> {
    let price = positive_price(data)?;
    let usd = BigUint::from(amount) * price / decimal_scale(data.decimals);
    Ok(u128::try_from(&usd).unwrap_or(u128::MAX))
}

/// Smallest wei amount whose USD-equivalent reaches `minimum_usd`.
///
/// This is `ceil(minimum_usd * 10^decimals / price)`.
///
/// # Errors
///
/// * `InvalidPrice` - the answer is zero or negative
/// * `Overflow` - no `u128` amount is worth `minimum_usd` at this price
pub fn minimum_contribution(minimum_usd: u128, data: PriceData) -> Result<u128> {
    let price = positive_price(data)?;
    let numerator = BigUint::from(minimum_usd) * decimal_scale(data.decimals);
    let wei = (numerator + &price - 1u8) / price;
    u128::try_from(&wei).map_err(|_| LedgerError::Overflow)
}

fn positive_price(data: PriceData) -> Result<BigUint> {
    if data.price <= 0 {
        return Err(LedgerError::InvalidPrice(data.price));
    }
    Ok(BigUint::from(data.price.unsigned_abs()))
}

fn decimal_scale(decimals: u8) -> BigUint {
    BigUint::from(10u8).pow(u32::from(decimals))
}

// ============================================================================
// Unit Tests
// ============================================================================
