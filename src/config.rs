//! Service configuration from the environment (`.env` is loaded by `main`).

use std::path::PathBuf;

use crate::domain::pricing::TierPolicy;
use crate::{PricingError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub tier_policy: TierPolicy,
    pub catalog_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self { Self { port: 8083, tier_policy: TierPolicy::Lenient, catalog_path: None } }
}

impl Config {
    /// Reads `PORT`, `TIER_POLICY` and `CATALOG_PATH`.
    pub fn from_env() -> Result<Self> { Self::from_lookup(|key| std::env::var(key).ok()) }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(port) = lookup("PORT") {
            config.port = port.trim().parse().map_err(|_| PricingError::Config(format!("invalid PORT '{}'", port)))?;
        }
        if let Some(policy) = lookup("TIER_POLICY") {
            config.tier_policy = policy.parse()?;
        }
        config.catalog_path = lookup("CATALOG_PATH").filter(|p| !p.trim().is_empty()).map(PathBuf::from);
        Ok(config)
    }
}
