//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// Prices are never negative.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    amount: Decimal,
    /// ISO 4217 currency code.
    currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal, currency_code: CurrencyCode) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self {
            amount,
            currency_code,
        })
    }

    /// A price in US dollars from a whole-cent amount.
    ///
    /// Cents are unsigned, so the result is always valid.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self {
            amount: Decimal::new(i64::from(cents), 2),
            currency_code: CurrencyCode::USD,
        }
    }

    /// Zero in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency_code,
        }
    }

    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }

    /// The price of `quantity` units.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self {
            amount: self.amount * Decimal::from(quantity),
            currency_code: self.currency_code,
        }
    }

    /// Format for display (e.g., "$65.00").
    #[must_use]
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:.2}",
            self.currency_code.symbol(),
            self.amount.round_dp(2)
        )
    }
}

impl Add for Price {
    type Output = Self;

    /// Adds two prices. The catalog is single-currency, so the left-hand
    /// currency is kept.
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            amount: self.amount + rhs.amount,
            currency_code: self.currency_code,
        }
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(CurrencyCode::default()), Add::add)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from_cents(6500).to_string(), "$65.00");
        assert_eq!(Price::from_cents(1999).to_string(), "$19.99");
        assert_eq!(Price::zero(CurrencyCode::USD).to_string(), "$0.00");
    }

    #[test]
    fn test_negative_rejected() {
        let result = Price::new(Decimal::new(-1, 0), CurrencyCode::USD);
        assert!(matches!(result, Err(PriceError::Negative(_))));
        assert!(Price::new(Decimal::ZERO, CurrencyCode::USD).is_ok());
    }

    #[test]
    fn test_times_and_sum() {
        let hoodie = Price::from_cents(6500);
        assert_eq!(hoodie.times(3).to_string(), "$195.00");
        assert_eq!(hoodie.times(0), Price::zero(CurrencyCode::USD));

        let total: Price = [hoodie, hoodie.times(2)].into_iter().sum();
        assert_eq!(total.amount(), Decimal::new(195, 0));
    }

    #[test]
    fn test_empty_sum_is_zero() {
        let total: Price = core::iter::empty().sum();
        assert_eq!(total, Price::zero(CurrencyCode::USD));
    }
}
