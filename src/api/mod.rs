//! HTTP routes for the storefront and admin pricing surfaces.

use axum::{extract::{Path, Query, State}, http::StatusCode, routing::{get, post}, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use validator::Validate;

use crate::catalog::Catalog;
use crate::domain::aggregates::Cart;
use crate::domain::pricing::{PriceComposer, PricingSheet, TierPreview};
use crate::domain::value_objects::{PriceQuote, PriceTier, Quantity, ServiceFlags};
use crate::workflows::{self, AddToCartInput, CustomPriceInput, VariantPrices};
use crate::PricingError;

#[derive(Clone)]
pub struct AppState { pub catalog: Arc<RwLock<Catalog>>, pub composer: PriceComposer }

impl AppState {
    pub fn new(catalog: Catalog, composer: PriceComposer) -> Self { Self { catalog: Arc::new(RwLock::new(catalog)), composer } }
}

type ApiResult<T> = Result<T, (StatusCode, String)>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "b2box-pricing"})) }))
        .route("/store/variants/:id/price", post(custom_price))
        .route("/store/carts", post(create_cart))
        .route("/store/carts/:id", get(get_cart))
        .route("/store/carts/:id/line-items-custom", post(add_custom_line_item))
        .route("/admin/pricing", get(get_prices).post(upsert_prices))
        .route("/admin/pricing/preview", post(preview_prices))
        .layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()).with_state(state)
}

fn reject(e: PricingError) -> (StatusCode, String) {
    let status = match &e {
        PricingError::VariantNotFound(_) | PricingError::RegionNotFound(_) | PricingError::CartNotFound(_) | PricingError::PriceSetNotFound(_) => StatusCode::NOT_FOUND,
        PricingError::StorageError(_) | PricingError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    };
    (status, e.to_string())
}

fn invalid(e: impl std::fmt::Display) -> (StatusCode, String) { (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()) }

#[derive(Debug, Deserialize, Validate)] pub struct CustomPriceRequest { #[validate(length(min = 1))] pub region_id: String, #[serde(default)] pub metadata: ServiceFlags, #[validate(range(min = 1))] pub quantity: u32 }
#[derive(Debug, Serialize)] pub struct PriceResponse { pub price: PriceQuote }

async fn custom_price(State(s): State<AppState>, Path(id): Path<String>, Json(r): Json<CustomPriceRequest>) -> ApiResult<Json<PriceResponse>> {
    r.validate().map_err(invalid)?;
    let input = CustomPriceInput { variant_id: id, region_id: r.region_id, quantity: Quantity::new(r.quantity).map_err(|_| reject(PricingError::InvalidQuantity))?, metadata: r.metadata };
    let catalog = s.catalog.read().await;
    let price = workflows::get_custom_price(&catalog, &s.composer, &input).map_err(reject)?;
    Ok(Json(PriceResponse { price }))
}

#[derive(Debug, Deserialize, Validate)] pub struct CreateCartRequest { #[validate(length(min = 1))] pub region_id: String }
#[derive(Debug, Serialize)] pub struct CartResponse { pub cart: Cart }

async fn create_cart(State(s): State<AppState>, Json(r): Json<CreateCartRequest>) -> ApiResult<(StatusCode, Json<CartResponse>)> {
    r.validate().map_err(invalid)?;
    let cart = workflows::create_cart(&mut *s.catalog.write().await, &r.region_id).map_err(reject)?;
    Ok((StatusCode::CREATED, Json(CartResponse { cart })))
}

async fn get_cart(State(s): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<CartResponse>> {
    let catalog = s.catalog.read().await;
    let cart = catalog.cart(&id).map_err(reject)?.clone();
    Ok(Json(CartResponse { cart }))
}

#[derive(Debug, Deserialize, Validate)] pub struct AddCustomLineItemRequest { #[validate(length(min = 1))] pub variant_id: String, #[validate(range(min = 1))] pub quantity: u32, #[serde(default)] pub metadata: ServiceFlags }

async fn add_custom_line_item(State(s): State<AppState>, Path(id): Path<String>, Json(r): Json<AddCustomLineItemRequest>) -> ApiResult<Json<CartResponse>> {
    r.validate().map_err(invalid)?;
    let input = AddToCartInput { cart_id: id, variant_id: r.variant_id, quantity: Quantity::new(r.quantity).map_err(|_| reject(PricingError::InvalidQuantity))?, metadata: r.metadata };
    let cart = workflows::custom_add_to_cart(&mut *s.catalog.write().await, &s.composer, &input).map_err(reject)?;
    Ok(Json(CartResponse { cart }))
}

#[derive(Debug, Deserialize)] pub struct PricingQuery { #[serde(rename = "variantId")] pub variant_id: Option<String> }

async fn get_prices(State(s): State<AppState>, Query(q): Query<PricingQuery>) -> ApiResult<Json<VariantPrices>> {
    let variant_id = q.variant_id.filter(|v| !v.is_empty()).ok_or((StatusCode::BAD_REQUEST, "variantId is required".to_string()))?;
    let catalog = s.catalog.read().await;
    workflows::variant_prices(&catalog, &variant_id).map(Json).map_err(reject)
}

#[derive(Debug, Deserialize, Validate)] #[serde(rename_all = "camelCase")] pub struct UpsertPricesRequest { #[validate(length(min = 1))] pub variant_id: String, pub price_set_id: Option<String>, pub prices: Vec<PriceTier> }

async fn upsert_prices(State(s): State<AppState>, Json(r): Json<UpsertPricesRequest>) -> ApiResult<Json<serde_json::Value>> {
    r.validate().map_err(invalid)?;
    let prices = workflows::upsert_prices(&mut *s.catalog.write().await, &r.variant_id, r.price_set_id.as_deref(), r.prices).map_err(reject)?;
    Ok(Json(serde_json::json!({"message": "Prices processed successfully", "result": {"data": prices}})))
}

#[derive(Debug, Serialize)] pub struct PreviewResponse { pub tiers: Vec<TierPreview>, pub prices: Vec<PriceTier> }

async fn preview_prices(Json(sheet): Json<PricingSheet>) -> ApiResult<Json<PreviewResponse>> {
    let tiers = sheet.preview().map_err(reject)?;
    let prices = sheet.to_price_tiers().map_err(reject)?;
    Ok(Json(PreviewResponse { tiers, prices }))
}
