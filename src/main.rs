//! B2Box pricing - custom tiered pricing service

use anyhow::Result;
use b2box_pricing::{api, Catalog, Config, PriceComposer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();

    let config = Config::from_env()?;
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::new(),
    };
    let (regions, variants, _) = catalog.counts();
    tracing::info!(regions, variants, policy = ?config.tier_policy, "catalog loaded");

    let app = api::router(api::AppState::new(catalog, PriceComposer::new(config.tier_policy)));
    tracing::info!("🚀 B2Box pricing listening on 0.0.0.0:{}", config.port);
    axum::serve(tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?, app).await?;
    Ok(())
}
