//! Authoritative price for a variant, quantity and set of add-on services in a region.

use crate::catalog::Catalog;
use crate::domain::pricing::PriceComposer;
use crate::domain::value_objects::{PriceQuote, Quantity, RegionRateTable, ServiceFlags};
use crate::Result;

#[derive(Clone, Debug)]
pub struct CustomPriceInput {
    pub variant_id: String,
    pub region_id: String,
    pub quantity: Quantity,
    pub metadata: ServiceFlags,
}

/// Prices the variant with the tiers in the region's currency. Region rates
/// are only read when a service is requested.
pub fn get_custom_price(catalog: &Catalog, composer: &PriceComposer, input: &CustomPriceInput) -> Result<PriceQuote> {
    let region = catalog.region(&input.region_id)?;
    let variant = catalog.variant(&input.variant_id)?;

    let tiers = variant.prices_in(region.currency_code());
    if tiers.is_empty() && !variant.prices().is_empty() {
        tracing::warn!(variant_id = %variant.id(), currency = %region.currency_code(), "variant has no prices in region currency");
    }

    let rates = if input.metadata.any() { region.rate_table(input.metadata)? } else { RegionRateTable::new() };
    let quote = composer.compose(&tiers, input.quantity, input.metadata, &rates)?;
    tracing::debug!(variant_id = %input.variant_id, region_id = %input.region_id, quantity = %input.quantity, price = %quote, "custom price computed");
    Ok(quote)
}
