//! Region Aggregate

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::value_objects::{RateError, RegionRateTable, ServiceFlags};

/// A sales region. Its metadata carries the add-on service rates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    id: String,
    #[serde(default)]
    name: String,
    currency_code: String,
    #[serde(default)]
    metadata: Map<String, Value>,
}

impl Region {
    pub fn new(id: impl Into<String>, currency_code: &str) -> Self {
        Self { id: id.into(), name: String::new(), currency_code: currency_code.to_lowercase(), metadata: Map::new() }
    }

    pub fn with_metadata(mut self, key: &str, value: Value) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn currency_code(&self) -> &str { &self.currency_code }
    pub fn metadata(&self) -> &Map<String, Value> { &self.metadata }

    /// Rates for the requested services only.
    pub fn rate_table(&self, flags: ServiceFlags) -> Result<RegionRateTable, RateError> { RegionRateTable::from_metadata(&self.metadata, flags) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::AddOnService;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_rate_table_from_metadata() {
        let region = Region::new("reg_es", "EUR")
            .with_metadata("extra_commercial_photos", json!(30))
            .with_metadata("extra_optimized_packaging", json!(12.5));
        assert_eq!(region.currency_code(), "eur");
        let flags = ServiceFlags::none().with(AddOnService::CommercialPhotos).with(AddOnService::OptimizedPackaging);
        let rates = region.rate_table(flags).unwrap();
        assert_eq!(rates.rate(AddOnService::CommercialPhotos), Some(dec!(30)));
        assert_eq!(rates.rate(AddOnService::OptimizedPackaging), Some(dec!(12.5)));
    }
}
