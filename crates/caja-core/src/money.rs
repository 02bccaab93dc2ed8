//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With binary floats:                                                    │
//! │    3.5 × 3 is fine, but 0.1 + 0.2 = 0.30000000000000004                │
//! │                                                                         │
//! │  OUR SOLUTION: Integer céntimos                                         │
//! │    S/3.50 is stored as 350, S/3.50 × 3 = 1050 → "S/10.50"              │
//! │    Prices read from CSV are parsed digit by digit, never through f64    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use caja_core::money::Money;
//!
//! let price = Money::from_cents(350); // S/3.50
//! let total = price.multiply_quantity(3);
//! assert_eq!(total.to_string(), "S/10.50");
//! assert_eq!(total.amount(), "10.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};
use ts_rs::TS;

use crate::error::{ValidationError, ValidationResult};
use crate::CURRENCY_SYMBOL;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in céntimos (1/100 of a sol).
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic stays closed under subtraction
/// - **Single field tuple struct**: zero-cost wrapper over i64
/// - **Display**: always two decimals, prefixed with `S/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from céntimos.
    ///
    /// ```rust
    /// use caja_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a non-negative decimal such as `"3"`, `"3.5"` or `"3.50"`.
    ///
    /// At most two decimal places are accepted. No floating point is
    /// involved, so `"0.29"` is exactly 29 céntimos.
    ///
    /// ```rust
    /// use caja_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("3.5").unwrap().cents(), 350);
    /// assert_eq!(Money::parse_decimal(" 10 ").unwrap().cents(), 1000);
    /// assert!(Money::parse_decimal("-1").is_err());
    /// assert!(Money::parse_decimal("1.999").is_err());
    /// ```
    pub fn parse_decimal(input: &str) -> ValidationResult<Self> {
        let raw = input.trim();
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "precio".to_string(),
            value: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(ValidationError::Required {
                field: "precio".to_string(),
            });
        }
        if raw.starts_with('-') {
            return Err(ValidationError::Negative {
                field: "precio".to_string(),
            });
        }

        let (whole, fraction) = raw.split_once('.').unwrap_or((raw, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("no es un número"));
        }
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid("no es un número"));
        }
        if fraction.len() > 2 {
            return Err(invalid("admite como máximo dos decimales"));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("es demasiado grande"))?
        };
        let minor: i64 = match fraction.len() {
            0 => 0,
            // "3.5" means fifty céntimos, not five
            1 => fraction.parse::<i64>().map_err(|_| invalid("no es un número"))? * 10,
            _ => fraction.parse().map_err(|_| invalid("no es un número"))?,
        };

        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(minor))
            .map(Money)
            .ok_or_else(|| invalid("es demasiado grande"))
    }

    /// Returns the value in céntimos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-soles portion.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the céntimos portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Product: postit S/3.50
    /// Quantity: 3
    ///      │
    ///      ▼
    /// multiply_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Total: S/10.50
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Like [`Money::multiply_quantity`], but `None` when the product does
    /// not fit in an `i64` of céntimos.
    ///
    /// ```rust
    /// use caja_core::money::Money;
    ///
    /// let price = Money::from_cents(10_000);
    /// assert_eq!(price.checked_multiply_quantity(3), Some(Money::from_cents(30_000)));
    /// assert_eq!(price.checked_multiply_quantity(i64::MAX), None);
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Addition that returns `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Formats the amount with two decimals and no currency symbol.
    ///
    /// Used for inventory tables and CSV columns where the header already
    /// says "Precio".
    pub fn amount(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money the way receipts print it: `S/5.00`, `-S/5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}{}.{:02}",
            sign,
            CURRENCY_SYMBOL,
            self.units().abs(),
            self.cents_part()
        )
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
        Money(self.0 + other.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
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
