//! Admin reads and writes of a variant's price set.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::domain::aggregates::VariantError;
use crate::domain::value_objects::PriceTier;
use crate::{PricingError, Result};

use super::publish;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantPrices {
    pub price_set_id: Option<String>,
    pub prices: Vec<PriceTier>,
}

pub fn variant_prices(catalog: &Catalog, variant_id: &str) -> Result<VariantPrices> {
    let variant = catalog.variant(variant_id)?;
    Ok(VariantPrices { price_set_id: variant.price_set_id().map(str::to_string), prices: variant.prices().to_vec() })
}

/// With `price_set_id` the whole set is replaced, otherwise `prices` are
/// appended to the variant's existing set.
pub fn upsert_prices(catalog: &mut Catalog, variant_id: &str, price_set_id: Option<&str>, prices: Vec<PriceTier>) -> Result<Vec<PriceTier>> {
    let variant = catalog.variant_mut(variant_id)?;
    let result = match price_set_id {
        Some(id) => variant.replace_prices(id, prices),
        None => variant.add_prices(prices),
    };
    result.map_err(|e| match e {
        VariantError::NoPriceSet => PricingError::PriceSetNotFound(variant_id.to_string()),
        VariantError::PriceSetMismatch(given) => PricingError::PriceSetMismatch { variant_id: variant_id.to_string(), given },
        VariantError::InvalidTiers(e) => e,
    })?;
    publish(variant.take_events());
    Ok(variant.prices().to_vec())
}
