use std::env;

use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BASE_URL: &str = "https://public.opendatasoft.com/api/explore/v2.1";
pub const DEFAULT_DATASET: &str = "us-colleges-and-universities";

/// Coordinates of the upstream dataset. Fixed at startup and shared
/// read-only with every request handler.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub base_url: String,
    pub dataset: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            dataset: DEFAULT_DATASET.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub catalog: CatalogConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| CatalogError::InvalidConfigValue {
                    field: "PORT".to_string(),
                    value: raw.clone(),
                    reason: "must be a TCP port number".to_string(),
                })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            catalog: CatalogConfig {
                base_url: env::var("CATALOG_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
                dataset: env::var("CATALOG_DATASET")
                    .unwrap_or_else(|_| DEFAULT_DATASET.to_string()),
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validate_url("CATALOG_BASE_URL", &self.catalog.base_url)?;
        validate_non_empty_string("CATALOG_DATASET", &self.catalog.dataset)?;

        tracing::info!("✅ Server configuration validation passed");
        Ok(())
    }
}
