//! Cart Aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::events::{CartEvent, DomainEvent};
use crate::domain::value_objects::{Money, MoneyError, PriceQuote, Quantity, ServiceFlags};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cart {
    id: String,
    region_id: String,
    currency_code: String,
    #[serde(default)]
    items: Vec<LineItem>,
    subtotal: Money,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

/// A priced cart line. `unit_price` is the quote for the whole quantity,
/// add-on services included, and is also the line total.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub variant_id: String,
    pub title: String,
    pub quantity: Quantity,
    pub unit_price: PriceQuote,
    #[serde(default)]
    pub metadata: ServiceFlags,
    pub created_at: DateTime<Utc>,
}

impl LineItem {
    pub fn new(variant_id: impl Into<String>, title: impl Into<String>, quantity: Quantity, unit_price: PriceQuote, metadata: ServiceFlags) -> Self {
        Self {
            id: format!("item_{}", Uuid::now_v7().simple()), variant_id: variant_id.into(), title: title.into(),
            quantity, unit_price, metadata, created_at: Utc::now(),
        }
    }

    pub fn line_total(&self, currency: &str) -> Money { Money::new(self.unit_price.amount(), currency) }
}

impl Cart {
    pub fn new(region_id: impl Into<String>, currency_code: &str) -> Self {
        let id = format!("cart_{}", Uuid::new_v4().simple());
        let region_id = region_id.into();
        let now = Utc::now();
        let mut cart = Self {
            id: id.clone(), region_id: region_id.clone(), currency_code: currency_code.to_lowercase(),
            items: vec![], subtotal: Money::zero(currency_code), created_at: now, updated_at: now, events: vec![],
        };
        cart.raise_event(DomainEvent::Cart(CartEvent::Created { cart_id: id, region_id }));
        cart
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn region_id(&self) -> &str { &self.region_id }
    pub fn currency_code(&self) -> &str { &self.currency_code }
    pub fn items(&self) -> &[LineItem] { &self.items }
    pub fn subtotal(&self) -> &Money { &self.subtotal }
    pub fn item_count(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Lines are never merged: each quote depends on its own quantity and services.
    pub fn add_item(&mut self, item: LineItem) -> Result<(), MoneyError> {
        let line_total = item.line_total(&self.currency_code);
        let subtotal = self.subtotal.add(&line_total)?;
        self.raise_event(DomainEvent::Cart(CartEvent::LineItemAdded {
            cart_id: self.id.clone(), line_item_id: item.id.clone(), variant_id: item.variant_id.clone(),
            quantity: item.quantity.value(), total: line_total.amount(),
        }));
        self.items.push(item);
        self.subtotal = subtotal;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: DomainEvent) { self.events.push(e); }
}
