//! Variant Aggregate

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::events::{DomainEvent, PricingEvent};
use crate::domain::pricing::tiers;
use crate::domain::value_objects::PriceTier;
use crate::PricingError;

/// A purchasable product variant and its price set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Variant {
    id: String,
    #[serde(default)]
    product_id: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    sku: Option<String>,
    #[serde(default)]
    price_set_id: Option<String>,
    #[serde(default)]
    prices: Vec<PriceTier>,
    #[serde(default)]
    metadata: Map<String, Value>,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

impl Variant {
    pub fn create(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(), product_id: None, title: title.into(), sku: None,
            price_set_id: None, prices: vec![], metadata: Map::new(), events: vec![],
        }
    }

    /// Attaches a new, empty price set.
    pub fn with_price_set(mut self) -> Self {
        self.price_set_id = Some(format!("pset_{}", Uuid::now_v7().simple()));
        self
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn title(&self) -> &str { &self.title }
    pub fn sku(&self) -> Option<&str> { self.sku.as_deref() }
    pub fn price_set_id(&self) -> Option<&str> { self.price_set_id.as_deref() }
    pub fn prices(&self) -> &[PriceTier] { &self.prices }
    pub fn metadata(&self) -> &Map<String, Value> { &self.metadata }

    /// The tiers priced in `currency_code`.
    pub fn prices_in(&self, currency_code: &str) -> Vec<PriceTier> {
        self.prices.iter().filter(|p| p.is_currency(currency_code)).cloned().collect()
    }

    /// Replaces every tier of the price set.
    pub fn replace_prices(&mut self, price_set_id: &str, prices: Vec<PriceTier>) -> Result<(), VariantError> {
        match self.price_set_id.as_deref() {
            None => return Err(VariantError::NoPriceSet),
            Some(own) if own != price_set_id => return Err(VariantError::PriceSetMismatch(price_set_id.to_string())),
            Some(_) => {}
        }
        tiers::validate(&prices).map_err(VariantError::InvalidTiers)?;
        let count = prices.len();
        self.prices = prices.into_iter().map(assign_id).collect();
        self.raise_event(DomainEvent::Pricing(PricingEvent::PricesReplaced { variant_id: self.id.clone(), price_set_id: price_set_id.to_string(), count }));
        Ok(())
    }

    /// Appends tiers to the existing price set.
    pub fn add_prices(&mut self, prices: Vec<PriceTier>) -> Result<(), VariantError> {
        let price_set_id = self.price_set_id.clone().ok_or(VariantError::NoPriceSet)?;
        let mut combined = self.prices.clone();
        combined.extend(prices.iter().cloned());
        tiers::validate(&combined).map_err(VariantError::InvalidTiers)?;
        let count = prices.len();
        self.prices.extend(prices.into_iter().map(assign_id));
        self.raise_event(DomainEvent::Pricing(PricingEvent::PricesAdded { variant_id: self.id.clone(), price_set_id, count }));
        Ok(())
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: DomainEvent) { self.events.push(e); }
}

fn assign_id(mut tier: PriceTier) -> PriceTier {
    if tier.id.is_none() { tier.id = Some(format!("price_{}", Uuid::now_v7().simple())); }
    tier
}

#[derive(Debug, Clone)] pub enum VariantError { NoPriceSet, PriceSetMismatch(String), InvalidTiers(PricingError) }
impl std::error::Error for VariantError {}
impl std::fmt::Display for VariantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPriceSet => write!(f, "No price set"),
            Self::PriceSetMismatch(id) => write!(f, "Price set mismatch: {}", id),
            Self::InvalidTiers(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn variant() -> Variant { Variant::create("variant_1", "Bluetooth speaker").with_price_set() }

    #[test]
    fn test_prices_in_currency() {
        let mut v = variant();
        v.add_prices(vec![
            PriceTier::new(dec!(5), "eur").with_range(Some(1), Some(9)),
            PriceTier::new(dec!(6), "usd").with_range(Some(1), Some(9)),
        ]).unwrap();
        assert_eq!(v.prices_in("EUR").len(), 1);
        assert!(v.prices().iter().all(|p| p.id.is_some()));
    }

    #[test]
    fn test_replace_requires_own_price_set() {
        let mut v = variant();
        let own = v.price_set_id().unwrap().to_string();
        assert!(matches!(v.replace_prices("pset_other", vec![]), Err(VariantError::PriceSetMismatch(_))));
        v.replace_prices(&own, vec![PriceTier::new(dec!(4), "eur")]).unwrap();
        assert_eq!(v.prices().len(), 1);
        let events = v.take_events();
        assert!(matches!(&events[..], [DomainEvent::Pricing(PricingEvent::PricesReplaced { count: 1, .. })]));
    }

    #[test]
    fn test_add_rejects_overlap() {
        let mut v = variant();
        v.add_prices(vec![PriceTier::new(dec!(5), "eur").with_range(Some(1), Some(49))]).unwrap();
        let err = v.add_prices(vec![PriceTier::new(dec!(4), "eur").with_range(Some(40), None)]).unwrap_err();
        assert!(matches!(err, VariantError::InvalidTiers(PricingError::OverlappingTiers { .. })));
        assert_eq!(v.prices().len(), 1);
    }

    #[test]
    fn test_no_price_set() {
        let mut v = Variant::create("variant_2", "Cable");
        assert!(matches!(v.add_prices(vec![]), Err(VariantError::NoPriceSet)));
    }
}
