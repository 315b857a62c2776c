//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Rupiah prices have no minor unit in practice:                          │
//! │    Rp 150.000 × 15% = Rp 22.500                                        │
//! │    Rp 99.999 × 15%  = Rp 14.999,85 → floor → Rp 14.999                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer whole units, explicit floor on percentages       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use titiktemu_core::money::{CurrencyFormat, Money};
//!
//! let price = Money::from_amount(150_000);
//! let line = price.checked_multiply_quantity(2).unwrap();
//! assert_eq!(line.amount(), 300_000);
//! assert_eq!(line.format(&CurrencyFormat::default()), "Rp 300.000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units (rupiah).
///
/// ## Design Decisions
/// - **i64 (signed)**: Differences (e.g. `subtotal - discount`) never wrap
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Transparent serde**: stored and transported as a plain number
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  OrderItem.price × qty ──► line total ──► Checkout subtotal            │
/// │                                                │                        │
/// │                       compute_discount() ◄─────┘                        │
/// │                                │                                        │
/// │                                ▼                                        │
/// │  Order.total = subtotal - discount ──► Invoice / receipt ("Rp 90.000") │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_amount(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Unit price × quantity, or `None` if the product leaves `i64`.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(amount) => Some(Money(amount)),
            None => None,
        }
    }

    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(amount) => Some(Money(amount)),
            None => None,
        }
    }

    /// Restricts the value to `[min, max]`.
    ///
    /// When `max < min` the result is `min`, so a zero or negative ceiling
    /// always collapses to the floor instead of panicking like `Ord::clamp`.
    #[inline]
    pub fn clamp_to(self, min: Money, max: Money) -> Money {
        if self > max {
            if max < min {
                min
            } else {
                max
            }
        } else if self < min {
            min
        } else {
            self
        }
    }

    /// Takes `percent`% of this amount, rounded down to a whole unit.
    ///
    /// ## Rounding
    /// Floor, never round-half-up: a customer is never given a larger
    /// discount than the percentage allows.
    ///
    /// ## Example
    /// ```rust
    /// use titiktemu_core::money::Money;
    ///
    /// let subtotal = Money::from_amount(99_999);
    /// assert_eq!(subtotal.percent_floor(15).amount(), 14_999);
    /// ```
    pub fn percent_floor(&self, percent: i64) -> Money {
        // i128 so that large subtotals × percent never overflow
        let raw = (self.0 as i128 * percent as i128).div_euclid(100);
        Money(raw.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    /// Formats the amount for print, e.g. `Rp 1.250.000`.
    ///
    /// Negative amounts put the sign in front of the prefix (`-Rp 5.000`).
    pub fn format(&self, currency: &CurrencyFormat) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(currency.thousands_separator);
            }
            grouped.push(ch);
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}{}", sign, currency.prefix, grouped)
    }
}

// =============================================================================
// Currency Format
// =============================================================================

/// How amounts are printed on documents.
///
/// Defaults to Indonesian rupiah (`Rp 1.250.000`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CurrencyFormat {
    /// Printed in front of every amount, including the trailing space.
    pub prefix: String,

    /// Digit group separator.
    pub thousands_separator: char,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat {
            prefix: "Rp ".to_string(),
            thousands_separator: '.',
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses the default rupiah format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&CurrencyFormat::default()))
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_groups_thousands() {
        let rp = CurrencyFormat::default();
        assert_eq!(Money::from_amount(0).format(&rp), "Rp 0");
        assert_eq!(Money::from_amount(999).format(&rp), "Rp 999");
        assert_eq!(Money::from_amount(1_000).format(&rp), "Rp 1.000");
        assert_eq!(Money::from_amount(100_000).format(&rp), "Rp 100.000");
        assert_eq!(Money::from_amount(1_250_000).format(&rp), "Rp 1.250.000");
        assert_eq!(Money::from_amount(-5_000).format(&rp), "-Rp 5.000");
    }

    #[test]
    fn test_format_custom_currency() {
        let usd = CurrencyFormat {
            prefix: "$".to_string(),
            thousands_separator: ',',
        };
        assert_eq!(Money::from_amount(1_234_567).format(&usd), "$1,234,567");
    }

    #[test]
    fn test_display_uses_rupiah() {
        assert_eq!(Money::from_amount(90_000).to_string(), "Rp 90.000");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_amount(100_000);
        let b = Money::from_amount(20_000);

        assert_eq!((a + b).amount(), 120_000);
        assert_eq!((a - b).amount(), 80_000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.amount(), 140_000);
    }

    #[test]
    fn test_checked_arithmetic() {
        let price = Money::from_amount(20_000);
        assert_eq!(price.checked_multiply_quantity(3), Some(Money::from_amount(60_000)));
        assert_eq!(price.checked_add(price), Some(Money::from_amount(40_000)));

        let huge = Money::from_amount(i64::MAX / 2 + 1);
        assert_eq!(huge.checked_multiply_quantity(2), None);
        assert_eq!(huge.checked_add(huge), None);
    }

    #[test]
    fn test_percent_floor_truncates() {
        assert_eq!(Money::from_amount(100_000).percent_floor(15).amount(), 15_000);
        assert_eq!(Money::from_amount(333).percent_floor(10).amount(), 33);
        assert_eq!(Money::from_amount(0).percent_floor(50).amount(), 0);
    }

    #[test]
    fn test_percent_floor_large_amount_no_overflow() {
        let huge = Money::from_amount(i64::MAX / 2);
        assert_eq!(huge.percent_floor(100), huge);
    }

    #[test]
    fn test_clamp_to() {
        let zero = Money::zero();
        let cap = Money::from_amount(10_000);

        assert_eq!(Money::from_amount(15_000).clamp_to(zero, cap), cap);
        assert_eq!(Money::from_amount(-1).clamp_to(zero, cap), zero);
        assert_eq!(Money::from_amount(5_000).clamp_to(zero, cap).amount(), 5_000);
        // Inverted bounds collapse to the floor
        assert_eq!(Money::from_amount(5).clamp_to(zero, Money::from_amount(-3)), zero);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Money::from_amount(42_000)).unwrap();
        assert_eq!(json, "42000");
        let back: Money = serde_json::from_str("42000").unwrap();
        assert_eq!(back.amount(), 42_000);
    }
}
