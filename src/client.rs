use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::api::responses::{
    ErrorResponse, FieldsResponse, LookupResponse, SearchResponse, StatsResponse,
};
use crate::catalog::query::{SearchParams, StatsParams};
use crate::utils::error::{CatalogError, Result};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Typed client mirroring the service surface, one method per endpoint.
pub struct CampusCatalogClient {
    http: Client,
    base: Url,
}

impl CampusCatalogClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url).map_err(|e| CatalogError::InvalidConfigValue {
            field: "base_url".to_string(),
            value: config.base_url.clone(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, base })
    }

    /// Joins path segments onto the base URL with percent-encoding, so
    /// names with spaces or punctuation survive as one segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidConfigValue {
                field: "base_url".to_string(),
                value: self.base.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        if let Ok(envelope) = serde_json::from_str::<ErrorResponse>(&body) {
            return Err(CatalogError::UpstreamRejected {
                status: envelope.error.status,
                message: envelope.error.message,
            });
        }
        Err(CatalogError::UpstreamRejected {
            status: status.as_u16(),
            message: format!("request failed with status {}", status.as_u16()),
        })
    }

    pub async fn search(&self, params: &SearchParams) -> Result<SearchResponse> {
        let url = self.endpoint(&["api", "search"])?;
        let response = self.http.post(url).json(params).send().await?;
        Self::parse(response).await
    }

    pub async fn university_by_id(&self, id: &str) -> Result<LookupResponse> {
        let url = self.endpoint(&["api", "universities", id])?;
        let response = self.http.get(url).send().await?;
        Self::parse(response).await
    }

    pub async fn university_by_name(&self, name: &str) -> Result<LookupResponse> {
        let url = self.endpoint(&["api", "universities", "name", name])?;
        let response = self.http.get(url).send().await?;
        Self::parse(response).await
    }

    pub async fn fields(&self) -> Result<FieldsResponse> {
        let url = self.endpoint(&["api", "fields"])?;
        let response = self.http.get(url).send().await?;
        Self::parse(response).await
    }

    pub async fn stats(&self, params: &StatsParams) -> Result<StatsResponse> {
        let url = self.endpoint(&["api", "stats"])?;
        let response = self.http.post(url).json(params).send().await?;
        Self::parse(response).await
    }

    pub async fn capabilities(&self) -> Result<Value> {
        let url = self.endpoint(&["api", "capabilities"])?;
        let response = self.http.get(url).send().await?;
        Self::parse(response).await
    }

    pub async fn health(&self) -> Result<Value> {
        let url = self.endpoint(&["health"])?;
        let response = self.http.get(url).send().await?;
        Self::parse(response).await
    }
}
