//! Add-on services a buyer can request on a cart line, and the per-region
//! rates they are charged at.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ServiceKind {
    /// Flat amount charged once per line.
    Fixed,
    /// Markup on the cheapest tier price, charged per unit.
    Percentage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AddOnService {
    #[serde(rename = "extra_barcode_registration")]
    BarcodeRegistration,
    #[serde(rename = "extra_commercial_photos")]
    CommercialPhotos,
    #[serde(rename = "extra_labelling_for_marketplaces")]
    LabellingForMarketplaces,
    #[serde(rename = "extra_optimized_packaging")]
    OptimizedPackaging,
}

impl AddOnService {
    pub const ALL: [AddOnService; 4] = [
        Self::BarcodeRegistration,
        Self::CommercialPhotos,
        Self::LabellingForMarketplaces,
        Self::OptimizedPackaging,
    ];

    /// Key used both in line-item metadata and in region metadata.
    pub fn key(&self) -> &'static str {
        match self {
            Self::BarcodeRegistration => "extra_barcode_registration",
            Self::CommercialPhotos => "extra_commercial_photos",
            Self::LabellingForMarketplaces => "extra_labelling_for_marketplaces",
            Self::OptimizedPackaging => "extra_optimized_packaging",
        }
    }

    pub fn kind(&self) -> ServiceKind {
        match self {
            Self::BarcodeRegistration | Self::CommercialPhotos => ServiceKind::Fixed,
            Self::LabellingForMarketplaces | Self::OptimizedPackaging => ServiceKind::Percentage,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> { Self::ALL.into_iter().find(|s| s.key() == key) }
}

impl fmt::Display for AddOnService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.key()) }
}

/// Which add-on services were requested for a cart line. Absent flags are `false`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceFlags {
    pub extra_labelling_for_marketplaces: bool,
    pub extra_barcode_registration: bool,
    pub extra_commercial_photos: bool,
    pub extra_optimized_packaging: bool,
}

impl ServiceFlags {
    pub fn none() -> Self { Self::default() }

    pub fn with(mut self, service: AddOnService) -> Self {
        *self.slot(service) = true;
        self
    }

    pub fn is_requested(&self, service: AddOnService) -> bool {
        match service {
            AddOnService::BarcodeRegistration => self.extra_barcode_registration,
            AddOnService::CommercialPhotos => self.extra_commercial_photos,
            AddOnService::LabellingForMarketplaces => self.extra_labelling_for_marketplaces,
            AddOnService::OptimizedPackaging => self.extra_optimized_packaging,
        }
    }

    pub fn requested(self) -> impl Iterator<Item = AddOnService> {
        AddOnService::ALL.into_iter().filter(move |s| self.is_requested(*s))
    }

    pub fn any(&self) -> bool { self.requested().next().is_some() }

    fn slot(&mut self, service: AddOnService) -> &mut bool {
        match service {
            AddOnService::BarcodeRegistration => &mut self.extra_barcode_registration,
            AddOnService::CommercialPhotos => &mut self.extra_commercial_photos,
            AddOnService::LabellingForMarketplaces => &mut self.extra_labelling_for_marketplaces,
            AddOnService::OptimizedPackaging => &mut self.extra_optimized_packaging,
        }
    }
}

/// Per-region surcharge rates: an absolute amount for fixed services, a
/// percentage for percentage services.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionRateTable {
    rates: BTreeMap<AddOnService, Decimal>,
}

impl RegionRateTable {
    pub fn new() -> Self { Self::default() }

    pub fn with_rate(mut self, service: AddOnService, rate: Decimal) -> Self {
        self.rates.insert(service, rate);
        self
    }

    pub fn rate(&self, service: AddOnService) -> Option<Decimal> { self.rates.get(&service).copied() }

    /// Reads the rates of the requested services out of region metadata.
    /// Other keys are never looked at, and `null` counts as absent. Rates
    /// may be JSON numbers or numeric strings.
    pub fn from_metadata(metadata: &Map<String, Value>, flags: ServiceFlags) -> Result<Self, RateError> {
        let mut table = Self::new();
        for service in flags.requested() {
            let rate = match metadata.get(service.key()) {
                None | Some(Value::Null) => continue,
                Some(Value::Number(n)) => Decimal::from_str(&n.to_string()).ok(),
                Some(Value::String(s)) => Decimal::from_str(s.trim()).ok(),
                Some(_) => None,
            };
            match rate {
                Some(rate) if !rate.is_sign_negative() => { table.rates.insert(service, rate); }
                _ => return Err(RateError::Invalid { service, value: metadata[service.key()].to_string() }),
            }
        }
        Ok(table)
    }

    /// Every requested service must have a rate before any surcharge is computed.
    pub fn ensure_covers(&self, flags: ServiceFlags) -> Result<(), RateError> {
        match flags.requested().find(|s| !self.rates.contains_key(s)) {
            Some(service) => Err(RateError::Missing(service)),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateError {
    Missing(AddOnService),
    Invalid { service: AddOnService, value: String },
}
impl std::error::Error for RateError {}
impl fmt::Display for RateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(service) => write!(f, "region has no rate for {}", service),
            Self::Invalid { service, value } => write!(f, "invalid rate for {}: {}", service, value),
        }
    }
}
