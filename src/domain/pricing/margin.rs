//! Margin-based sale price preview used by the admin pricing panel.
//!
//! An admin enters up to three purchase prices with their minimum order
//! quantities and a margin per tier and currency. The preview shows the
//! resulting sale prices and the contiguous price tiers they would produce.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::tiers;
use crate::domain::value_objects::{PriceQuote, PriceTier};
use crate::{PricingError, Result};

/// `(purchase_price + packaging_price) * (1 + margin / 100)`.
pub fn sale_price(purchase_price: Decimal, margin_pct: Decimal, packaging_price: Option<Decimal>) -> Result<Decimal> {
    let cost = purchase_price.checked_add(packaging_price.unwrap_or(Decimal::ZERO)).ok_or(PricingError::Overflow)?;
    let multiplier = Decimal::ONE + margin_pct / Decimal::ONE_HUNDRED;
    cost.checked_mul(multiplier).ok_or(PricingError::Overflow)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierValues<T> {
    pub tier1: Option<T>,
    pub tier2: Option<T>,
    pub tier3: Option<T>,
}

impl<T: Copy> TierValues<T> {
    pub fn as_array(&self) -> [Option<T>; 3] { [self.tier1, self.tier2, self.tier3] }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSheet {
    #[serde(default)]
    pub purchase_prices: TierValues<Decimal>,
    #[serde(default)]
    pub min_quantities: TierValues<u32>,
    /// Margin percentages keyed by currency code.
    #[serde(default)]
    pub margins: BTreeMap<String, TierValues<Decimal>>,
    #[serde(default)]
    pub include_packaging: bool,
    #[serde(default)]
    pub packaging_price: Option<Decimal>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierPreview {
    pub currency_code: String,
    pub tier: u8,
    pub min_quantity: Option<u32>,
    pub max_quantity: Option<u32>,
    pub purchase_price: Decimal,
    pub margin: Decimal,
    pub sale_price: PriceQuote,
}

impl PricingSheet {
    fn packaging(&self) -> Option<Decimal> {
        if self.include_packaging { self.packaging_price } else { None }
    }

    /// Sale price per currency and tier. A tier is shown when it has a
    /// purchase price and a margin; tiers 2 and 3 also need a minimum
    /// quantity. Each tier ends one below the next shown tier's minimum.
    pub fn preview(&self) -> Result<Vec<TierPreview>> {
        let purchases = self.purchase_prices.as_array();
        let mins = self.min_quantities.as_array();
        let mut previews = Vec::new();
        for (currency, margins) in &self.margins {
            let margins = margins.as_array();
            let shown: Vec<usize> = (0..3)
                .filter(|&i| purchases[i].is_some() && margins[i].is_some() && (i == 0 || mins[i].is_some()))
                .collect();
            for (pos, &i) in shown.iter().enumerate() {
                let (Some(purchase_price), Some(margin)) = (purchases[i], margins[i]) else { continue };
                let max_quantity = shown.get(pos + 1).and_then(|&next| mins[next]).map(|m| m.saturating_sub(1));
                previews.push(TierPreview {
                    currency_code: currency.to_lowercase(),
                    tier: i as u8 + 1,
                    min_quantity: mins[i],
                    max_quantity,
                    purchase_price,
                    margin,
                    sale_price: PriceQuote::from_amount(sale_price(purchase_price, margin, self.packaging())?),
                });
            }
        }
        Ok(previews)
    }

    /// The previewed sale prices as a price set, checked for overlaps.
    pub fn to_price_tiers(&self) -> Result<Vec<PriceTier>> {
        let prices: Vec<PriceTier> = self
            .preview()?
            .into_iter()
            .map(|p| PriceTier::new(p.sale_price.amount(), &p.currency_code).with_range(p.min_quantity, p.max_quantity))
            .collect();
        tiers::validate(&prices)?;
        Ok(prices)
    }
}
