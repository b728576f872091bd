//! Domain events
use rust_decimal::Decimal;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainEvent {
    Cart(CartEvent),
    Pricing(PricingEvent),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CartEvent {
    Created { cart_id: String, region_id: String },
    LineItemAdded { cart_id: String, line_item_id: String, variant_id: String, quantity: u32, total: Decimal },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PricingEvent {
    PricesReplaced { variant_id: String, price_set_id: String, count: usize },
    PricesAdded { variant_id: String, price_set_id: String, count: usize },
}
