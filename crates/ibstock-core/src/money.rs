//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A cashier types "0.1" then "0.2" of change in floating point:          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (centavos for MZN)                   │
//! │    10 + 20 = 30 centavos, always                                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ibstock_core::money::Money;
//!
//! // Create from minor units (preferred)
//! let price = Money::from_cents(10_000); // 100.00 MT
//!
//! // Arithmetic operations
//! let doubled = price * 2;
//! assert_eq!(doubled.cents(), 20_000);
//!
//! // Amounts typed by the cashier are parsed, never converted from floats
//! let tendered = Money::parse_amount("600").unwrap();
//! assert_eq!(tendered, Money::from_major(600));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (centavos).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.unit_price ──► CartLine.unit_price ──► CartLine.line_total     │
/// │                                                                         │
/// │  Cart.total ──► Checkout: tendered vs total ──► change                  │
/// │                                                                         │
/// │  Customer.outstanding_credit (display only)                             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use ibstock_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole major units (meticais).
    ///
    /// Catalog prices are whole amounts, so this is what fixtures use.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use ibstock_core::money::Money;
    ///
    /// let unit_price = Money::from_major(130); // Refrigerante Cola 2L
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total, Money::from_major(390));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Returns `self - other`, floored at zero.
    ///
    /// Used for change: a customer is never owed a negative amount.
    #[inline]
    pub fn saturating_sub_floor(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0).max(0))
    }

    /// Parses an amount typed by a cashier into Money.
    ///
    /// ## Accepted Input
    /// - Surrounding whitespace is ignored
    /// - Optional sign (`+` / `-`)
    /// - `.` or `,` as the decimal separator (pt-MZ keyboards use `,`)
    /// - Any number of fractional digits; the third rounds half-up
    ///
    /// Returns `None` for blank or malformed input. Callers decide what a
    /// missing amount means.
    ///
    /// ## Example
    /// ```rust
    /// use ibstock_core::money::Money;
    ///
    /// assert_eq!(Money::parse_amount("600"), Some(Money::from_major(600)));
    /// assert_eq!(Money::parse_amount(" 12,5 "), Some(Money::from_cents(1250)));
    /// assert_eq!(Money::parse_amount("0.125"), Some(Money::from_cents(13)));
    /// assert_eq!(Money::parse_amount(""), None);
    /// assert_eq!(Money::parse_amount("abc"), None);
    /// ```
    pub fn parse_amount(input: &str) -> Option<Money> {
        let trimmed = input.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (whole, frac) = match unsigned.find(|c: char| c == '.' || c == ',') {
            Some(idx) => (&unsigned[..idx], &unsigned[idx + 1..]),
            None => (unsigned, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return None;
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let major: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };

        let digit = |i: usize| frac.as_bytes().get(i).map_or(0, |b| i64::from(b - b'0'));
        let mut minor = digit(0) * 10 + digit(1);
        if digit(2) >= 5 {
            minor += 1;
        }

        let cents = major.checked_mul(100)?.checked_add(minor)?;
        Some(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain `major.minor` rendering without a currency symbol.
///
/// The terminal app adds the configured symbol; this is for logs.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents_and_major() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);

        assert_eq!(Money::from_major(250).cents(), 25_000);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_major(100).to_string(), "100.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let big = Money::from_cents(i64::MAX / 2 + 1);
        assert_eq!(big.multiply_quantity(3).cents(), i64::MAX);
        assert_eq!((big * -3).cents(), i64::MIN);
        assert_eq!((big + big).cents(), i64::MAX);
        assert_eq!((Money::from_cents(i64::MIN) - big).cents(), i64::MIN);

        let total: Money = vec![big, big, big].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
    }

    #[test]
    fn test_saturating_sub_floor() {
        let total = Money::from_major(500);
        assert_eq!(Money::from_major(600).saturating_sub_floor(total), Money::from_major(100));
        assert_eq!(Money::from_major(400).saturating_sub_floor(total), Money::zero());
    }

    #[test]
    fn test_parse_amount_whole_and_fraction() {
        assert_eq!(Money::parse_amount("600"), Some(Money::from_major(600)));
        assert_eq!(Money::parse_amount("12.5"), Some(Money::from_cents(1250)));
        assert_eq!(Money::parse_amount("12,50"), Some(Money::from_cents(1250)));
        assert_eq!(Money::parse_amount(".75"), Some(Money::from_cents(75)));
        assert_eq!(Money::parse_amount("3."), Some(Money::from_major(3)));
        assert_eq!(Money::parse_amount("+7"), Some(Money::from_major(7)));
        assert_eq!(Money::parse_amount("-7"), Some(Money::from_major(-7)));
    }

    #[test]
    fn test_parse_amount_rounds_third_digit() {
        assert_eq!(Money::parse_amount("0.125"), Some(Money::from_cents(13)));
        assert_eq!(Money::parse_amount("0.124"), Some(Money::from_cents(12)));
        assert_eq!(Money::parse_amount("9.999"), Some(Money::from_major(10)));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(Money::parse_amount(""), None);
        assert_eq!(Money::parse_amount("   "), None);
        assert_eq!(Money::parse_amount("."), None);
        assert_eq!(Money::parse_amount("abc"), None);
        assert_eq!(Money::parse_amount("1.2.3"), None);
        assert_eq!(Money::parse_amount("1e3"), None);
        assert_eq!(Money::parse_amount("99999999999999999999"), None);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
    }
}
