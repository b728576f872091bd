//! Pricing rules shared by checkout and the admin preview.
//!
//! Checkout prices a line with [`PriceComposer::compose`]: the tier unit
//! price times quantity, plus add-on surcharges. Percentage surcharges are
//! computed on the cheapest tier, not the tier the quantity falls into.
//! The admin panel previews sale prices with [`margin::sale_price`].

pub mod margin;
pub mod surcharge;
pub mod tiers;

use crate::domain::value_objects::{PriceQuote, PriceTier, Quantity, RegionRateTable, ServiceFlags};
use crate::{PricingError, Result};

pub use margin::{sale_price, PricingSheet, TierPreview, TierValues};
pub use surcharge::surcharge;
pub use tiers::{cheapest, resolve, TierPolicy};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PriceComposer {
    policy: TierPolicy,
}

impl PriceComposer {
    pub fn new(policy: TierPolicy) -> Self { Self { policy } }
    pub fn policy(&self) -> TierPolicy { self.policy }

    /// Price for `quantity` units of a variant, services included.
    pub fn compose(&self, tiers: &[PriceTier], quantity: Quantity, flags: ServiceFlags, rates: &RegionRateTable) -> Result<PriceQuote> {
        let unit_price = resolve(tiers, quantity, self.policy)?;
        let base_total = unit_price.checked_mul(quantity.as_decimal()).ok_or(PricingError::Overflow)?;
        if !flags.any() {
            return Ok(PriceQuote::from_amount(base_total));
        }
        rates.ensure_covers(flags)?;
        let bulk_unit_price = cheapest(tiers).unwrap_or(unit_price);
        let extras = surcharge(flags, rates, bulk_unit_price, quantity)?;
        let total = base_total.checked_add(extras).ok_or(PricingError::Overflow)?;
        Ok(PriceQuote::from_amount(total))
    }
}

/// [`PriceComposer::compose`] with the lenient tier policy.
pub fn compose(tiers: &[PriceTier], quantity: Quantity, flags: ServiceFlags, rates: &RegionRateTable) -> Result<PriceQuote> {
    PriceComposer::default().compose(tiers, quantity, flags, rates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::AddOnService;
    use rust_decimal_macros::dec;

    fn qty(n: u32) -> Quantity { Quantity::new(n).unwrap() }

    fn tiers() -> Vec<PriceTier> {
        vec![
            PriceTier::new(dec!(5.00), "eur").with_range(Some(1), Some(9)),
            PriceTier::new(dec!(4.50), "eur").with_range(Some(10), Some(19)),
            PriceTier::new(dec!(4.00), "eur").with_range(Some(20), None),
        ]
    }

    fn rates() -> RegionRateTable {
        RegionRateTable::new()
            .with_rate(AddOnService::BarcodeRegistration, dec!(2.50))
            .with_rate(AddOnService::LabellingForMarketplaces, dec!(10))
    }

    #[test]
    fn test_no_services_is_unit_times_quantity() {
        let tiers = vec![PriceTier::new(dec!(3.33), "eur")];
        assert_eq!(compose(&tiers, qty(3), ServiceFlags::none(), &RegionRateTable::new()).unwrap().to_string(), "9.99");
        assert_eq!(compose(&self::tiers(), qty(12), ServiceFlags::none(), &RegionRateTable::new()).unwrap().to_string(), "54.00");
    }

    #[test]
    fn test_rounds_sub_cent_unit_prices() {
        let tiers = vec![PriceTier::new(dec!(3.333), "eur")];
        assert_eq!(compose(&tiers, qty(3), ServiceFlags::none(), &RegionRateTable::new()).unwrap().to_string(), "10.00");
    }

    #[test]
    fn test_fixed_service_added_once() {
        let flags = ServiceFlags::none().with(AddOnService::BarcodeRegistration);
        assert_eq!(compose(&tiers(), qty(1), flags, &rates()).unwrap().to_string(), "7.50");
        assert_eq!(compose(&tiers(), qty(100), flags, &rates()).unwrap().to_string(), "402.50");
    }

    #[test]
    fn test_percentage_service_uses_cheapest_tier() {
        let flags = ServiceFlags::none().with(AddOnService::LabellingForMarketplaces);
        // 20 * 4.00 base, plus 4.00 * 1.10 * 20 = 88.00
        assert_eq!(compose(&tiers(), qty(20), flags, &rates()).unwrap().to_string(), "168.00");
        // Quantity 5 sits in the 5.00 tier, the surcharge still uses 4.00.
        assert_eq!(compose(&tiers(), qty(5), flags, &rates()).unwrap().to_string(), "47.00");
    }

    #[test]
    fn test_missing_rate_surfaces() {
        let flags = ServiceFlags::none().with(AddOnService::OptimizedPackaging);
        assert_eq!(
            compose(&tiers(), qty(1), flags, &rates()),
            Err(PricingError::MissingServiceRate { service: "extra_optimized_packaging" })
        );
    }

    #[test]
    fn test_empty_tiers_charge_only_fixed_fees() {
        let flags = ServiceFlags::none().with(AddOnService::BarcodeRegistration).with(AddOnService::LabellingForMarketplaces);
        assert_eq!(compose(&[], qty(4), flags, &rates()).unwrap().to_string(), "2.50");
    }

    #[test]
    fn test_strict_composer() {
        let gapped = vec![PriceTier::new(dec!(4), "eur").with_range(Some(10), None)];
        let strict = PriceComposer::new(TierPolicy::Strict);
        assert_eq!(strict.compose(&gapped, qty(2), ServiceFlags::none(), &RegionRateTable::new()), Err(PricingError::NoMatchingTier { quantity: 2 }));
        assert_eq!(compose(&gapped, qty(2), ServiceFlags::none(), &RegionRateTable::new()).unwrap().to_string(), "8.00");
    }

    #[test]
    fn test_compose_is_repeatable() {
        let flags = ServiceFlags::none().with(AddOnService::BarcodeRegistration).with(AddOnService::LabellingForMarketplaces);
        let first = compose(&tiers(), qty(33), flags, &rates()).unwrap();
        let second = compose(&tiers(), qty(33), flags, &rates()).unwrap();
        assert_eq!(first, second);
    }
}
