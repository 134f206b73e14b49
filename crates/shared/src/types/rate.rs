//! Percentage rate with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Rates are stored in percent units (`7` means 7%) on top of `Decimal`.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A percentage rate applied to a monetary base.
///
/// Rates are conventionally 0-100 but are not capped: a 150% markup is
/// representable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(pub Decimal);

impl Rate {
    /// The zero rate.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// One hundred percent.
    pub const FULL: Self = Self(Decimal::ONE_HUNDRED);

    /// Creates a rate from a value in percent units.
    #[must_use]
    pub const fn percent(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the rate in percent units.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// Returns true if the rate is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the rate is negative.
    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Applies the rate to `base`: `base × rate / 100`.
    ///
    /// Returns `None` if the result cannot be represented.
    #[must_use]
    pub fn checked_of(self, base: Decimal) -> Option<Decimal> {
        base.checked_mul(self.0)
            .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
            // near the top of the range, scale the rate down first
            .or_else(|| base.checked_mul(self.0.checked_div(Decimal::ONE_HUNDRED)?))
    }

    /// Rounds the rate itself using Banker's Rounding.
    #[must_use]
    pub fn round_dp(self, decimal_places: u32) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven),
        )
    }
}

impl From<Decimal> for Rate {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

impl std::iter::Sum for Rate {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|r| r.0).sum())
    }
}
