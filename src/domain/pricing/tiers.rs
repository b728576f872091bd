//! Quantity tier selection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::domain::value_objects::{PriceTier, Quantity};
use crate::{PricingError, Result};

/// What to do when no tier covers the requested quantity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierPolicy {
    /// Fall back to the lowest-ordered tier.
    #[default]
    Lenient,
    /// Report `NoMatchingTier`.
    Strict,
}

impl FromStr for TierPolicy {
    type Err = PricingError;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(PricingError::Config(format!("unknown tier policy '{}'", other))),
        }
    }
}

/// Tiers ordered by minimum quantity, `None` counting as 0. Ties keep input order.
pub fn ordered(tiers: &[PriceTier]) -> Vec<&PriceTier> {
    let mut sorted: Vec<&PriceTier> = tiers.iter().collect();
    sorted.sort_by_key(|t| t.min());
    sorted
}

/// Unit price for `quantity`. An empty tier list prices at zero.
pub fn resolve(tiers: &[PriceTier], quantity: Quantity, policy: TierPolicy) -> Result<Decimal> {
    let sorted = ordered(tiers);
    let Some(first) = sorted.first() else { return Ok(Decimal::ZERO) };
    if let Some(tier) = sorted.iter().find(|t| t.contains(quantity)) {
        return Ok(tier.amount);
    }
    match policy {
        TierPolicy::Lenient => Ok(first.amount),
        TierPolicy::Strict => Err(PricingError::NoMatchingTier { quantity: quantity.value() }),
    }
}

/// Lowest amount across all tiers, used as the bulk rate for percentage services.
pub fn cheapest(tiers: &[PriceTier]) -> Option<Decimal> { tiers.iter().map(|t| t.amount).min() }

/// Checks that each currency's tiers have sane bounds and do not overlap.
pub fn validate(tiers: &[PriceTier]) -> Result<()> {
    let mut by_currency: BTreeMap<String, Vec<&PriceTier>> = BTreeMap::new();
    for tier in tiers {
        if tier.amount.is_sign_negative() || tier.min() > tier.max() {
            return Err(PricingError::InvalidTierRange { currency: tier.currency_code.clone(), min: tier.min(), max: tier.max() });
        }
        by_currency.entry(tier.currency_code.to_lowercase()).or_default().push(tier);
    }
    for (currency, mut group) in by_currency {
        group.sort_by_key(|t| t.min());
        for pair in group.windows(2) {
            if pair[0].max() >= pair[1].min() {
                return Err(PricingError::OverlappingTiers { currency, at: pair[1].min() });
            }
        }
    }
    Ok(())
}
