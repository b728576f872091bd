//! Checkout and admin workflows over the catalog.
//!
//! Each workflow fetches what it needs from the [`Catalog`](crate::Catalog),
//! runs the pricing rules and writes back. Domain events raised along the
//! way are drained and logged here.

pub mod add_to_cart;
pub mod custom_price;
pub mod price_sets;

pub use add_to_cart::{create_cart, custom_add_to_cart, AddToCartInput};
pub use custom_price::{get_custom_price, CustomPriceInput};
pub use price_sets::{upsert_prices, variant_prices, VariantPrices};

use crate::domain::events::{CartEvent, DomainEvent, PricingEvent};

pub(crate) fn publish(events: Vec<DomainEvent>) {
    for event in events {
        match event {
            DomainEvent::Cart(CartEvent::Created { cart_id, region_id }) => {
                tracing::info!(%cart_id, %region_id, "cart created");
            }
            DomainEvent::Cart(CartEvent::LineItemAdded { cart_id, line_item_id, variant_id, quantity, total }) => {
                tracing::info!(%cart_id, %line_item_id, %variant_id, quantity, %total, "custom line item added");
            }
            DomainEvent::Pricing(PricingEvent::PricesReplaced { variant_id, price_set_id, count }) => {
                tracing::info!(%variant_id, %price_set_id, count, "price set replaced");
            }
            DomainEvent::Pricing(PricingEvent::PricesAdded { variant_id, price_set_id, count }) => {
                tracing::info!(%variant_id, %price_set_id, count, "prices added");
            }
        }
    }
}
