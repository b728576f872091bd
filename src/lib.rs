//! B2Box custom pricing
//!
//! Quantity-tiered pricing for a B2B storefront.
//!
//! ## Features
//! - Tier resolution by quantity, with lenient or strict fallback
//! - Fixed and percentage add-on service surcharges per region
//! - Authoritative line price composition for checkout
//! - Margin-based sale price preview for the admin panel
//! - Custom add-to-cart workflow over an in-memory catalog

use thiserror::Error;

pub mod api;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod workflows;

pub use catalog::Catalog;
pub use config::Config;
pub use domain::pricing::{compose, PriceComposer, TierPolicy};
pub use domain::value_objects::{
    AddOnService, PriceQuote, PriceTier, Quantity, RegionRateTable, ServiceFlags,
};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("Variant not found: {0}")]
    VariantNotFound(String),

    #[error("Region not found: {0}")]
    RegionNotFound(String),

    #[error("Cart not found: {0}")]
    CartNotFound(String),

    #[error("Price set not found for variant {0}")]
    PriceSetNotFound(String),

    #[error("Price set {given} does not belong to variant {variant_id}")]
    PriceSetMismatch { variant_id: String, given: String },

    #[error("No price tier covers quantity {quantity}")]
    NoMatchingTier { quantity: u32 },

    #[error("Invalid quantity")]
    InvalidQuantity,

    #[error("Region has no rate for {service}")]
    MissingServiceRate { service: &'static str },

    #[error("Invalid rate for {service}: {value}")]
    InvalidRate { service: &'static str, value: String },

    #[error("Invalid tier range {min}..{max} in {currency}")]
    InvalidTierRange { currency: String, min: u32, max: u32 },

    #[error("Overlapping price tiers in {currency} at quantity {at}")]
    OverlappingTiers { currency: String, at: u32 },

    #[error("Currency mismatch")]
    CurrencyMismatch,

    #[error("Amount overflow")]
    Overflow,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

pub type Result<T> = std::result::Result<T, PricingError>;

impl From<domain::value_objects::RateError> for PricingError {
    fn from(e: domain::value_objects::RateError) -> Self {
        use domain::value_objects::RateError;
        match e {
            RateError::Missing(service) => Self::MissingServiceRate { service: service.key() },
            RateError::Invalid { service, value } => Self::InvalidRate { service: service.key(), value },
        }
    }
}

impl From<domain::value_objects::MoneyError> for PricingError {
    fn from(e: domain::value_objects::MoneyError) -> Self {
        use domain::value_objects::MoneyError;
        match e { MoneyError::CurrencyMismatch => Self::CurrencyMismatch, MoneyError::Overflow => Self::Overflow }
    }
}
