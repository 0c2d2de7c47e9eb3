//! # Money Types
//!
//! Currency handling for the order engine. Amounts are carried as
//! `rust_decimal::Decimal` and converted to the currency's smallest unit
//! with exact scaled-integer arithmetic, never floating point.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    INR,
    USD,
    EUR,
    GBP,
    JPY,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
        }
    }

    /// Returns the number of decimal places for this currency
    /// (JPY has 0 decimals, the others have 2)
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Convert a decimal major-unit amount to the smallest currency unit
    /// (paise for INR, cents for USD).
    ///
    /// Returns `None` if the amount carries more precision than the
    /// currency supports (e.g. INR 10.005) or overflows an `i64`. The
    /// conversion is exact; there is no rounding.
    pub fn to_minor_units(&self, amount: Decimal) -> Option<i64> {
        let scaled = amount.checked_mul(Decimal::from(10_i64.pow(self.decimal_places())))?;
        if scaled != scaled.trunc() {
            return None;
        }
        scaled.trunc().to_i64()
    }

    /// Convert from smallest unit back to a decimal major-unit amount
    pub fn from_minor_units(&self, minor: i64) -> Decimal {
        Decimal::new(minor, self.decimal_places())
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::INR
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
