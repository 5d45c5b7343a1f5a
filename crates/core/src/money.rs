//! Monetary amounts and interest rates.
//!
//! Both are thin wrappers over `rust_decimal::Decimal`: exact base-10
//! arithmetic, signed, single currency.

use core::str::FromStr;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A signed amount of money.
///
/// Balances may legitimately go negative (negative deposits and negative
/// interest are accepted), so unlike a wire-level amount this type carries no
/// sign invariant. All arithmetic is checked; overflow is reported as an
/// invariant violation instead of panicking.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn checked_add(self, other: Money) -> DomainResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| DomainError::invariant("balance overflow"))
    }

    pub fn checked_sub(self, other: Money) -> DomainResult<Money> {
        self.0
            .checked_sub(other.0)
            .map(Money)
            .ok_or_else(|| DomainError::invariant("balance overflow"))
    }

    /// Used when applying already-validated events, where overflow was ruled
    /// out at decision time.
    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    pub fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }

    /// Simple interest on this amount: `self * rate / 100`.
    pub fn interest(self, rate: Rate) -> DomainResult<Money> {
        self.0
            .checked_mul(rate.0)
            .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
            .map(Money)
            .ok_or_else(|| DomainError::invariant("interest overflow"))
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0.normalize(), f)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s).map(Money)
    }
}

/// An interest rate expressed in percent (`10` means 10%).
///
/// Any sign is accepted; a negative rate shrinks the balance.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(Decimal);

impl ValueObject for Rate {}

impl Rate {
    pub const fn percent(value: Decimal) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for Rate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0.normalize(), f)
    }
}

impl From<Decimal> for Rate {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<i64> for Rate {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl FromStr for Rate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s).map(Rate)
    }
}

// Accepts plain ("12.50") and scientific ("1e3") notation.
fn parse_decimal(s: &str) -> DomainResult<Decimal> {
    let s = s.trim();
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|_| DomainError::invalid_amount(format!("{s:?} is not a number")))
}
