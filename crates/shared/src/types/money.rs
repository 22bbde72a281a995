//! Money amounts in integer minor units.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are stored as an `i64` number of cents. `rust_decimal::Decimal` is only
//! used at the boundary, when a decimal value enters or leaves the system.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AppError;

/// Number of fraction digits kept for every amount (cents).
pub const DECIMAL_PLACES: u32 = 2;

/// Largest magnitude, in major units, accepted from decimal input.
///
/// Ten trillion units leaves room for thousands of maximal amounts to be
/// summed in `i64` cents.
pub const MAX_MAJOR_UNITS: i64 = 10_000_000_000_000;

/// Signed money amount represented as **integer cents**.
///
/// The sign carries meaning only where the caller gives it one: a member balance
/// is positive when the member is owed money and negative when they owe money.
///
/// Converting from a decimal rounds to two places using round-half-away-from-zero,
/// so `0.005` becomes `0.01` and `-0.005` becomes `-0.01`.
///
/// Operators saturate at the `i64` bounds instead of overflowing; use
/// [`Amount::checked_add`] / [`Amount::checked_sub`] to detect it.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use divvy_shared::types::Amount;
///
/// let amount = Amount::from_decimal(dec!(12.345)).unwrap();
/// assert_eq!(amount.cents(), 1235);
/// assert_eq!(amount.to_string(), "12.35");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// The smallest representable unit (one cent).
    pub const CENT: Self = Self(1);

    /// Creates an amount from integer cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates an amount from whole currency units.
    #[must_use]
    pub const fn from_major(units: i64) -> Self {
        Self(units * 100)
    }

    /// Converts a decimal value, rounding to cents (half away from zero).
    ///
    /// # Errors
    ///
    /// Returns a validation error if the magnitude exceeds [`MAX_MAJOR_UNITS`].
    pub fn from_decimal(value: Decimal) -> Result<Self, AppError> {
        if value.abs() > Decimal::from(MAX_MAJOR_UNITS) {
            return Err(AppError::Validation(format!("amount out of range: {value}")));
        }
        value
            .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Self)
            .ok_or_else(|| AppError::Validation(format!("amount out of range: {value}")))
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns the amount as a decimal with two fraction digits.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, DECIMAL_PLACES)
    }

    /// Absolute value.
    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns true if the amount is strictly negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Amount {
    type Err = AppError;

    /// Parses a decimal string (e.g. `"12.5"`, `"-3"`) into cents.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = Decimal::from_str(trimmed)
            .map_err(|_| AppError::Validation(format!("invalid amount: {trimmed:?}")))?;
        Self::from_decimal(value)
    }
}

impl From<i64> for Amount {
    fn from(cents: i64) -> Self {
        Self(cents)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(self.0.saturating_neg())
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Serialized as a decimal string in major units (`"12.50"`).
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.to_decimal(), serializer)
    }
}

/// Accepts a JSON number or a decimal string in major units.
impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::from_decimal(value).map_err(serde::de::Error::custom)
    }
}
