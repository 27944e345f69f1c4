//! Money type for ticket prices and order totals.
//!
//! The remote EventHub API quotes all amounts in INR as plain decimal
//! numbers, so a single-currency wrapper over `rust_decimal::Decimal`
//! is enough. Using `Decimal` keeps `price * quantity` sums exact.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount of money in INR.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero rupees.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a money value from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a money value from a whole number of rupees.
    #[must_use]
    pub fn from_rupees(rupees: i64) -> Self {
        Self(Decimal::from(rupees))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by a ticket quantity, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(
            self.0
                .checked_mul(Decimal::from(quantity))
                .unwrap_or(Decimal::MAX),
        )
    }
}

impl Add for Money {
    type Output = Self;

    /// Saturating addition; amounts never wrap.
    fn add(self, rhs: Self) -> Self {
        Self(self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX))
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        self.times(rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    /// Renders as `₹x.xx`, matching the storefront's price display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{:.2}", self.0)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_display_two_decimal_places() {
        assert_eq!(Money::from_rupees(500).to_string(), "₹500.00");
        assert_eq!(Money::new(Decimal::new(29950, 2)).to_string(), "₹299.50");
    }

    #[test]
    fn test_line_total() {
        let price = Money::from_rupees(500);
        assert_eq!(price.times(2), Money::from_rupees(1000));
    }

    #[test]
    fn test_overflow_saturates() {
        let max = Money::new(Decimal::MAX);
        assert_eq!(max.times(2), max);
        assert_eq!(max + Money::from_rupees(1), max);
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_rupees(300), Money::from_rupees(700)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_rupees(1000));
    }
}
