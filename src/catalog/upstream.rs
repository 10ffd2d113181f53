use async_trait::async_trait;
use reqwest::Client;

use crate::catalog::model::RecordsPage;
use crate::catalog::query::RecordsQuery;
use crate::config::CatalogConfig;
use crate::utils::error::{CatalogError, Result};

/// Port for the upstream catalog. Handlers depend on this, not on the
/// concrete HTTP client, so tests can swap in a stub.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn records(&self, query: &RecordsQuery) -> Result<RecordsPage>;
}

pub struct CatalogClient {
    http: Client,
    config: CatalogConfig,
}

impl CatalogClient {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    fn records_url(&self) -> String {
        format!(
            "{}/catalog/datasets/{}/records",
            self.config.base_url.trim_end_matches('/'),
            self.config.dataset
        )
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn records(&self, query: &RecordsQuery) -> Result<RecordsPage> {
        let url = self.records_url();
        tracing::debug!("Requesting catalog records from: {}", url);

        let response = self
            .http
            .get(&url)
            .query(&query.to_query_pairs())
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Catalog response status: {}", status);

        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("message")
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| "Catalog request failed".to_string());
            return Err(CatalogError::UpstreamRejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<RecordsPage>().await?)
    }
}
