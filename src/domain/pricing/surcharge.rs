//! Add-on service surcharges.

use rust_decimal::Decimal;

use crate::domain::value_objects::{Quantity, RateError, RegionRateTable, ServiceFlags, ServiceKind};
use crate::{PricingError, Result};

/// Total surcharge for the requested services.
///
/// Fixed services add their rate once per line. Percentage services add
/// `base_unit_price * (1 + rate / 100) * quantity`; the base price is
/// charged again on top of the markup.
pub fn surcharge(flags: ServiceFlags, rates: &RegionRateTable, base_unit_price: Decimal, quantity: Quantity) -> Result<Decimal> {
    let mut total = Decimal::ZERO;
    for service in flags.requested() {
        let rate = rates.rate(service).ok_or(RateError::Missing(service))?;
        let charge = match service.kind() {
            ServiceKind::Fixed => rate,
            ServiceKind::Percentage => {
                let multiplier = Decimal::ONE + rate / Decimal::ONE_HUNDRED;
                base_unit_price
                    .checked_mul(multiplier)
                    .and_then(|unit| unit.checked_mul(quantity.as_decimal()))
                    .ok_or(PricingError::Overflow)?
            }
        };
        total = total.checked_add(charge).ok_or(PricingError::Overflow)?;
    }
    Ok(total)
}
