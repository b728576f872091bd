//! In-memory catalog of variants, regions and carts.
//!
//! Seeded from a JSON document at startup:
//!
//! ```json
//! { "regions": [ { "id": "reg_es", "currency_code": "eur", "metadata": { ... } } ],
//!   "variants": [ { "id": "variant_1", "price_set_id": "pset_1", "prices": [ ... ] } ] }
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::domain::aggregates::{Cart, Region, Variant};
use crate::domain::pricing::tiers;
use crate::{PricingError, Result};

#[derive(Debug, Default, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub regions: Vec<Region>,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

#[derive(Debug, Default)]
pub struct Catalog {
    variants: HashMap<String, Variant>,
    regions: HashMap<String, Region>,
    carts: HashMap<String, Cart>,
}

impl Catalog {
    pub fn new() -> Self { Self::default() }

    /// Seeded variants get the same tier checks as prices written through the API.
    pub fn from_seed(seed: CatalogSeed) -> Result<Self> {
        let mut catalog = Self::new();
        seed.regions.into_iter().for_each(|r| catalog.insert_region(r));
        for variant in seed.variants {
            tiers::validate(variant.prices()).map_err(|e| PricingError::StorageError(format!("variant {}: {}", variant.id(), e)))?;
            catalog.insert_variant(variant);
        }
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let seed: CatalogSeed = serde_json::from_str(json).map_err(|e| PricingError::StorageError(e.to_string()))?;
        Self::from_seed(seed)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| PricingError::StorageError(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn insert_region(&mut self, region: Region) { self.regions.insert(region.id().to_string(), region); }
    pub fn insert_variant(&mut self, variant: Variant) { self.variants.insert(variant.id().to_string(), variant); }
    pub fn insert_cart(&mut self, cart: Cart) { self.carts.insert(cart.id().to_string(), cart); }

    pub fn region(&self, id: &str) -> Result<&Region> {
        self.regions.get(id).ok_or_else(|| PricingError::RegionNotFound(id.to_string()))
    }

    pub fn variant(&self, id: &str) -> Result<&Variant> {
        self.variants.get(id).ok_or_else(|| PricingError::VariantNotFound(id.to_string()))
    }

    pub fn variant_mut(&mut self, id: &str) -> Result<&mut Variant> {
        self.variants.get_mut(id).ok_or_else(|| PricingError::VariantNotFound(id.to_string()))
    }

    pub fn cart(&self, id: &str) -> Result<&Cart> {
        self.carts.get(id).ok_or_else(|| PricingError::CartNotFound(id.to_string()))
    }

    pub fn cart_mut(&mut self, id: &str) -> Result<&mut Cart> {
        self.carts.get_mut(id).ok_or_else(|| PricingError::CartNotFound(id.to_string()))
    }

    pub fn counts(&self) -> (usize, usize, usize) { (self.regions.len(), self.variants.len(), self.carts.len()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = r#"{
        "regions": [{"id": "reg_es", "currency_code": "eur", "metadata": {"extra_barcode_registration": 2.5}}],
        "variants": [{"id": "variant_1", "title": "Speaker", "price_set_id": "pset_1",
                      "prices": [{"amount": 5, "currency_code": "eur", "min_quantity": 1, "max_quantity": 9}]}]
    }"#;

    #[test]
    fn test_seed() {
        let catalog = Catalog::from_json(SEED).unwrap();
        assert_eq!(catalog.counts(), (1, 1, 0));
        assert_eq!(catalog.variant("variant_1").unwrap().prices().len(), 1);
        assert_eq!(catalog.region("reg_es").unwrap().currency_code(), "eur");
    }

    #[test]
    fn test_lookups_report_missing() {
        let catalog = Catalog::new();
        assert_eq!(catalog.cart("cart_x").unwrap_err(), PricingError::CartNotFound("cart_x".into()));
        assert!(matches!(catalog.variant("v"), Err(PricingError::VariantNotFound(_))));
    }

    #[test]
    fn test_example_catalog_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/catalog.example.json");
        let catalog = Catalog::load(&path).unwrap();
        let variant = catalog.variant("variant_speaker_black").unwrap();
        assert_eq!(variant.prices_in("eur").len(), 3);
        assert_eq!(catalog.region("reg_es").unwrap().rate_table(crate::ServiceFlags::none().with(crate::AddOnService::CommercialPhotos)).unwrap().rate(crate::AddOnService::CommercialPhotos), Some(30.into()));
    }

    #[test]
    fn test_bad_seed() {
        assert!(matches!(Catalog::from_json("{\"regions\": 3}"), Err(PricingError::StorageError(_))));
        assert!(Catalog::load(Path::new("/nonexistent/catalog.json")).is_err());
    }

    #[test]
    fn test_seed_rejects_overlapping_tiers() {
        let seed = r#"{"variants": [{"id": "variant_1", "title": "Speaker", "prices": [
            {"amount": 5, "currency_code": "eur", "min_quantity": 1, "max_quantity": 20},
            {"amount": 4, "currency_code": "eur", "min_quantity": 20}
        ]}]}"#;
        match Catalog::from_json(seed) {
            Err(PricingError::StorageError(msg)) => assert!(msg.starts_with("variant variant_1:"), "{}", msg),
            other => panic!("expected storage error, got {:?}", other),
        }
    }
}
