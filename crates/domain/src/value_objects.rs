//! Value objects shared across the cart subsystem.

use serde::{Deserialize, Serialize};

/// Identifier of a product in the catalog.
///
/// Valid ids are positive; catalog construction enforces that, the newtype
/// itself just carries the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Creates a product ID from a raw value.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw id value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ProductId> for i64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

/// Monetary amount held in integer minor units (cents) to avoid
/// floating-point drift.
///
/// The payment gateway wants minor units, so the handoff is a plain
/// accessor. Line math saturates at the `i64` extremes instead of wrapping.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates an amount from minor units.
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates an amount from whole major units (e.g. dollars).
    pub fn from_major(major: i64) -> Self {
        Self(major.saturating_mul(100))
    }

    /// Returns the zero amount.
    pub fn zero() -> Self {
        Self(0)
    }

    /// Parses a decimal string (`"19.99"`, `"20"`, `"20.5"`) into cents,
    /// rounding anything past two decimals half-up.
    ///
    /// Returns `None` for empty or non-numeric input.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (negative, digits) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw.strip_prefix('+').unwrap_or(raw)),
        };

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let whole: i64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().ok()?
        };

        let mut frac = [0u8; 3];
        for (slot, b) in frac.iter_mut().zip(frac_part.bytes()) {
            *slot = b - b'0';
        }

        let mut cents = whole
            .checked_mul(100)?
            .checked_add((frac[0] as i64) * 10 + frac[1] as i64)?;
        if frac[2] >= 5 {
            cents = cents.checked_add(1)?;
        }

        Some(Self(if negative { -cents } else { cents }))
    }

    /// Returns the amount in minor units.
    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies by a quantity, saturating on overflow.
    pub fn times(&self, qty: u32) -> Self {
        Self(self.0.saturating_mul(qty as i64))
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{sign}${}.{:02}", (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}
