//! Adds a custom-priced line item to a cart.

use crate::catalog::Catalog;
use crate::domain::aggregates::{Cart, LineItem};
use crate::domain::pricing::PriceComposer;
use crate::domain::value_objects::{Quantity, ServiceFlags};
use crate::Result;

use super::custom_price::{get_custom_price, CustomPriceInput};
use super::publish;

#[derive(Clone, Debug)]
pub struct AddToCartInput {
    pub cart_id: String,
    pub variant_id: String,
    pub quantity: Quantity,
    pub metadata: ServiceFlags,
}

pub fn create_cart(catalog: &mut Catalog, region_id: &str) -> Result<Cart> {
    let region = catalog.region(region_id)?;
    let mut cart = Cart::new(region.id(), region.currency_code());
    publish(cart.take_events());
    catalog.insert_cart(cart.clone());
    Ok(cart)
}

/// Prices the line in the cart's region and appends it. The quote is stored
/// as the line's `unit_price` and covers the whole quantity.
pub fn custom_add_to_cart(catalog: &mut Catalog, composer: &PriceComposer, input: &AddToCartInput) -> Result<Cart> {
    let region_id = catalog.cart(&input.cart_id)?.region_id().to_string();
    let price_input = CustomPriceInput {
        variant_id: input.variant_id.clone(),
        region_id,
        quantity: input.quantity,
        metadata: input.metadata,
    };
    let price = get_custom_price(catalog, composer, &price_input)?;
    let title = catalog.variant(&input.variant_id)?.title().to_string();

    let cart = catalog.cart_mut(&input.cart_id)?;
    cart.add_item(LineItem::new(&input.variant_id, title, input.quantity, price, input.metadata))?;
    publish(cart.take_events());
    Ok(cart.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::{Region, Variant};
    use crate::PricingError;
    use crate::domain::value_objects::{AddOnService, PriceTier};
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert_region(Region::new("reg_es", "eur").with_metadata("extra_barcode_registration", json!("2.50")));
        let mut variant = Variant::create("variant_1", "Speaker").with_price_set();
        variant.add_prices(vec![PriceTier::new(dec!(3.33), "eur")]).unwrap();
        catalog.insert_variant(variant);
        catalog
    }

    #[test]
    fn test_add_custom_line() {
        let mut catalog = catalog();
        let cart = create_cart(&mut catalog, "reg_es").unwrap();
        let input = AddToCartInput {
            cart_id: cart.id().to_string(),
            variant_id: "variant_1".into(),
            quantity: Quantity::new(3).unwrap(),
            metadata: ServiceFlags::none().with(AddOnService::BarcodeRegistration),
        };
        let cart = custom_add_to_cart(&mut catalog, &PriceComposer::default(), &input).unwrap();
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items()[0].unit_price.to_string(), "12.49");
        assert_eq!(cart.items()[0].title, "Speaker");
        assert_eq!(cart.subtotal().amount(), dec!(12.49));
        // Stored back into the catalog.
        assert_eq!(catalog.cart(cart.id()).unwrap().item_count(), 1);
    }

    #[test]
    fn test_unknown_cart_or_variant() {
        let mut catalog = catalog();
        let mut input = AddToCartInput {
            cart_id: "cart_missing".into(),
            variant_id: "variant_1".into(),
            quantity: Quantity::new(1).unwrap(),
            metadata: ServiceFlags::none(),
        };
        assert!(matches!(custom_add_to_cart(&mut catalog, &PriceComposer::default(), &input), Err(PricingError::CartNotFound(_))));
        input.cart_id = create_cart(&mut catalog, "reg_es").unwrap().id().to_string();
        input.variant_id = "variant_missing".into();
        assert!(matches!(custom_add_to_cart(&mut catalog, &PriceComposer::default(), &input), Err(PricingError::VariantNotFound(_))));
        assert!(create_cart(&mut catalog, "reg_xx").is_err());
    }
}
