//! Pricing domain: value objects, aggregates, events and the pricing rules.
pub mod aggregates;
pub mod events;
pub mod pricing;
pub mod value_objects;
