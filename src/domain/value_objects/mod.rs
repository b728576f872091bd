//! Value Objects for pricing

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

pub mod services;

pub use services::{AddOnService, RateError, RegionRateTable, ServiceFlags, ServiceKind};

/// Quantity value object. A line always carries at least one unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(value: u32) -> Result<Self, QuantityError> {
        if value == 0 { return Err(QuantityError::Zero); }
        Ok(Self(value))
    }
    pub fn value(&self) -> u32 { self.0 }
    pub fn as_decimal(&self) -> Decimal { Decimal::from(self.0) }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;
    fn try_from(value: u32) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> Self { q.0 }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone)] pub enum QuantityError { Zero }
impl std::error::Error for QuantityError {}
impl fmt::Display for QuantityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "quantity must be at least 1") }
}

/// Money value object
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money { amount: Decimal, currency: String }

impl Money {
    pub fn new(amount: Decimal, currency: &str) -> Self { Self { amount, currency: currency.to_lowercase() } }
    pub fn zero(currency: &str) -> Self { Self::new(Decimal::ZERO, currency) }
    pub fn amount(&self) -> Decimal { self.amount }
    pub fn currency(&self) -> &str { &self.currency }
    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency { return Err(MoneyError::CurrencyMismatch); }
        let amount = self.amount.checked_add(other.amount).ok_or(MoneyError::Overflow)?;
        Ok(Money::new(amount, &self.currency))
    }
}

#[derive(Debug, Clone)] pub enum MoneyError { CurrencyMismatch, Overflow }
impl std::error::Error for MoneyError {}
impl fmt::Display for MoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Self::CurrencyMismatch => write!(f, "Currency mismatch"), Self::Overflow => write!(f, "Amount overflow") }
    }
}

/// One quantity-ranged unit price of a variant's price set.
///
/// `min_quantity` of `None` means 0 and `max_quantity` of `None` means
/// unbounded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub amount: Decimal,
    pub currency_code: String,
    #[serde(default)]
    pub min_quantity: Option<u32>,
    #[serde(default)]
    pub max_quantity: Option<u32>,
}

impl PriceTier {
    pub fn new(amount: Decimal, currency_code: &str) -> Self {
        Self { id: None, amount, currency_code: currency_code.to_lowercase(), min_quantity: None, max_quantity: None }
    }

    pub fn with_range(mut self, min_quantity: Option<u32>, max_quantity: Option<u32>) -> Self {
        self.min_quantity = min_quantity;
        self.max_quantity = max_quantity;
        self
    }

    pub fn min(&self) -> u32 { self.min_quantity.unwrap_or(0) }
    pub fn max(&self) -> u32 { self.max_quantity.unwrap_or(u32::MAX) }

    pub fn contains(&self, quantity: Quantity) -> bool {
        (self.min()..=self.max()).contains(&quantity.value())
    }

    pub fn is_currency(&self, code: &str) -> bool { self.currency_code.eq_ignore_ascii_case(code) }
}

/// A computed line price, always carried at two decimal places.
///
/// Rounds half away from zero and renders as a fixed `0.00` string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PriceQuote(Decimal);

impl PriceQuote {
    pub fn from_amount(amount: Decimal) -> Self {
        let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        Self(rounded)
    }
    pub fn amount(&self) -> Decimal { self.0 }
}

impl fmt::Display for PriceQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl Serialize for PriceQuote {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> { serializer.collect_str(self) }
}

impl<'de> Deserialize<'de> for PriceQuote {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Decimal as Deserialize>::deserialize(deserializer).map(Self::from_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quantity_rejects_zero() {
        assert!(Quantity::new(0).is_err());
        assert_eq!(Quantity::new(3).unwrap().value(), 3);
        assert!(serde_json::from_str::<Quantity>("0").is_err());
    }

    #[test]
    fn test_money_add() {
        let a = Money::new(dec!(100), "EUR");
        let b = Money::new(dec!(50), "eur");
        assert_eq!(a.add(&b).unwrap().amount(), dec!(150));
        assert!(a.add(&Money::zero("usd")).is_err());
    }

    #[test]
    fn test_tier_bounds_default_open() {
        let tier = PriceTier::new(dec!(5), "eur");
        assert!(tier.contains(Quantity::new(1).unwrap()));
        assert!(tier.contains(Quantity::new(u32::MAX).unwrap()));
        let bounded = tier.with_range(Some(10), Some(49));
        assert!(!bounded.contains(Quantity::new(9).unwrap()));
        assert!(bounded.contains(Quantity::new(49).unwrap()));
        assert!(!bounded.contains(Quantity::new(50).unwrap()));
    }

    #[test]
    fn test_quote_formats_two_places() {
        assert_eq!(PriceQuote::from_amount(dec!(80)).to_string(), "80.00");
        assert_eq!(PriceQuote::from_amount(dec!(9.99)).to_string(), "9.99");
        assert_eq!(PriceQuote::from_amount(dec!(1.005)).to_string(), "1.01");
        assert_eq!(PriceQuote::from_amount(dec!(9.999)).to_string(), "10.00");
        assert_eq!(serde_json::to_string(&PriceQuote::from_amount(dec!(2.5))).unwrap(), "\"2.50\"");
    }

    #[test]
    fn test_quote_reads_strings_and_numbers() {
        let quote: PriceQuote = serde_json::from_str("\"168.00\"").unwrap();
        assert_eq!(quote, PriceQuote::from_amount(dec!(168)));
        let quote: PriceQuote = serde_json::from_str("9.999").unwrap();
        assert_eq!(quote.to_string(), "10.00");
    }

    #[test]
    fn test_tier_deserializes_plain_numbers() {
        let tier: PriceTier = serde_json::from_str(r#"{"amount": 4.5, "currency_code": "eur", "min_quantity": 10}"#).unwrap();
        assert_eq!(tier.amount, dec!(4.5));
        assert_eq!(tier.min(), 10);
        assert_eq!(tier.max_quantity, None);
    }
}
