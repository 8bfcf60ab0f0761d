//! Currency amounts with full decimal precision.
//!
//! Uses `rust_decimal` internally so sums carry no floating-point drift.
//! Values are only rounded (to 2 places) when displayed.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

/// A currency amount.
///
/// Arithmetic keeps every digit; `Display` rounds half away from zero to
/// two decimal places.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use rental_fees::Money;
///
/// let amount = Money::from_str("4.995").unwrap();
/// assert_eq!(amount.to_string(), "5.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Money(Decimal);

impl Money {
    /// Decimal places shown when displayed.
    pub const DISPLAY_SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Money(Decimal::ZERO);

    /// One currency unit.
    pub const ONE: Self = Money(Decimal::ONE);

    /// Largest amount accepted from input (10^15).
    ///
    /// Keeps a single fee (rate + penalty per day * days + replacement) far
    /// below the `Decimal` range, so only summation needs overflow checks.
    pub const MAX_INPUT: Self = Money(Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0));

    /// Returns the underlying decimal value, at the scale it was parsed with.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Adds `rhs`, returning `None` on overflow.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Sums `amounts` in iteration order, returning `None` on overflow.
    pub fn checked_sum<I: IntoIterator<Item = Self>>(amounts: I) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |acc, m| acc.checked_add(m))
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if this value is below zero.
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(Self::DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{:.2}", rounded)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

/// Scales a per-day amount by a whole number of days.
impl Mul<i64> for Money {
    type Output = Self;

    fn mul(self, days: i64) -> Self::Output {
        Money(self.0 * Decimal::from(days))
    }
}
