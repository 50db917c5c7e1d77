//! Non-negative monetary amounts.
//!
//! Wraps `rust_decimal` so item costs and per-person shares are computed
//! without floating-point drift. An [`Amount`] is never negative.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// A non-negative money value.
///
/// Construction clamps negative input to zero, and arithmetic saturates at
/// `Decimal::MAX` instead of overflowing, so settlement math never fails.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use settlement_calculator::Amount;
///
/// let price = Amount::from_str("1000").unwrap();
/// assert_eq!(price.split_ceil(3).unwrap().to_string(), "334");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Amount(Decimal);

impl Amount {
    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Fraction digits kept by [`Amount::grouped`].
    pub const DISPLAY_SCALE: u32 = 3;

    /// Creates an amount, clamping negative values to zero.
    pub fn new(value: Decimal) -> Self {
        if value < Decimal::ZERO {
            Amount::ZERO
        } else {
            Amount(value.normalize())
        }
    }

    /// Returns the underlying decimal.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Cost of `quantity` units at this unit price.
    pub fn times(self, quantity: u32) -> Self {
        let product = self
            .0
            .checked_mul(Decimal::from(quantity))
            .unwrap_or(Decimal::MAX);
        Amount::new(product)
    }

    /// One sharer's portion of this amount, rounded up to a whole unit.
    ///
    /// Returns `None` when there is nobody to split between.
    pub fn split_ceil(self, sharers: usize) -> Option<Self> {
        if sharers == 0 {
            return None;
        }
        let share = self.0.checked_div(Decimal::from(sharers as u64))?;
        Some(Amount::new(share.ceil()))
    }

    /// Difference floored at zero.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Amount::new(self.0 - rhs.0)
    }

    /// Formats with thousands separators and at most three fraction digits,
    /// e.g. `1234567.5` becomes `1,234,567.5`.
    pub fn grouped(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(Self::DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
            .normalize();
        let text = rounded.to_string();
        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (text.as_str(), None),
        };

        let mut out = String::with_capacity(text.len() + whole.len() / 3);
        for (idx, ch) in whole.chars().enumerate() {
            if idx > 0 && (whole.len() - idx) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        if let Some(fraction) = fraction {
            out.push('.');
            out.push_str(fraction);
        }
        out
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(Decimal::from(value))
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim())?;
        Ok(Amount::new(decimal))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}
