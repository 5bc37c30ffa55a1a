//! Fixed-point amount utilities for fees and proceeds.
//!
//! ## Overview
//!
//! Mint fees and collected proceeds are stored as u64 scaled by 10^8 so no
//! floating-point value ever enters ledger state.
//!
//! ## Examples
//!
//! ```
//! use swap_market::types::amount::{to_fixed, from_fixed};
//!
//! let fee = to_fixed("0.01").unwrap();
//! assert_eq!(fee, 1_000_000);
//! assert_eq!(from_fixed(fee), "0.01000000");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point arithmetic: 10^8
pub const SCALE: u64 = 100_000_000;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal string to fixed-point u64
///
/// Returns `None` for unparseable, negative or out-of-range input.
///
/// # Example
///
/// ```
/// use swap_market::types::amount::to_fixed;
///
/// assert_eq!(to_fixed("1.0"), Some(100_000_000));
/// assert_eq!(to_fixed("0.02"), Some(2_000_000));
/// assert_eq!(to_fixed("-1"), None);
/// ```
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s.trim()).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a Decimal to fixed-point u64
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    scaled.round_dp(0).to_u64()
}

/// Convert fixed-point u64 to a Decimal
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Convert fixed-point u64 to a string with 8 decimal places
pub fn from_fixed(value: u64) -> String {
    format!("{:.8}", fixed_to_decimal(value))
}

/// Convert fixed-point u64 to a human-readable string (trailing zeros trimmed)
///
/// # Example
///
/// ```
/// use swap_market::types::amount::from_fixed_trimmed;
///
/// assert_eq!(from_fixed_trimmed(1_000_000), "0.01");
/// assert_eq!(from_fixed_trimmed(100_000_000), "1");
/// ```
pub fn from_fixed_trimmed(value: u64) -> String {
    fixed_to_decimal(value).normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_fixed_basic() {
        assert_eq!(to_fixed("0.01"), Some(1_000_000));
        assert_eq!(to_fixed("1"), Some(100_000_000));
        assert_eq!(to_fixed("0.00000001"), Some(1));
        assert_eq!(to_fixed(" 2.5 "), Some(250_000_000));
    }

    #[test]
    fn test_to_fixed_rejects_invalid() {
        assert_eq!(to_fixed("-0.01"), None);
        assert_eq!(to_fixed("abc"), None);
        assert_eq!(to_fixed(""), None);
    }

    #[test]
    fn test_from_fixed() {
        assert_eq!(from_fixed(1_000_000), "0.01000000");
        assert_eq!(from_fixed(0), "0.00000000");
        assert_eq!(from_fixed_trimmed(150_000_000), "1.5");
    }
}
