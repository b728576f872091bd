//! Aggregates module
pub mod cart;
pub mod region;
pub mod variant;

pub use cart::{Cart, LineItem};
pub use region::Region;
pub use variant::{Variant, VariantError};
