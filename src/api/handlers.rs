use std::sync::Arc;

use axum::extract::{Path, State};
use serde::Serialize;
use serde_json::{json, Value};

use crate::api::extract::Json;
use crate::api::responses::{FieldsResponse, LookupResponse, SearchResponse, StatsResponse};
use crate::catalog::fields::infer_fields;
use crate::catalog::query::{
    lookup_query, sample_query, search_query, stats_query, SearchParams, StatsParams, ID_FIELD,
    NAME_FIELD,
};
use crate::catalog::upstream::CatalogSource;
use crate::utils::error::{CatalogError, Result};

pub async fn search(
    State(catalog): State<Arc<dyn CatalogSource>>,
    Json(params): Json<SearchParams>,
) -> Result<Json<SearchResponse>> {
    let query = search_query(&params)?;
    let page = catalog.records(&query).await?;
    Ok(Json(SearchResponse::new(page, &params)))
}

pub async fn university_by_id(
    State(catalog): State<Arc<dyn CatalogSource>>,
    Path(id): Path<String>,
) -> Result<Json<LookupResponse>> {
    lookup_one(catalog, ID_FIELD, &id).await
}

pub async fn university_by_name(
    State(catalog): State<Arc<dyn CatalogSource>>,
    Path(name): Path<String>,
) -> Result<Json<LookupResponse>> {
    lookup_one(catalog, NAME_FIELD, &name).await
}

async fn lookup_one(
    catalog: Arc<dyn CatalogSource>,
    field: &str,
    value: &str,
) -> Result<Json<LookupResponse>> {
    let page = catalog.records(&lookup_query(field, value)).await?;
    let record = page
        .results
        .into_iter()
        .next()
        .ok_or_else(|| CatalogError::not_found("University"))?;
    Ok(Json(LookupResponse::new(record)))
}

/// Sketches the dataset schema from one sample row. An empty dataset
/// yields an empty field list, not an error.
pub async fn fields(
    State(catalog): State<Arc<dyn CatalogSource>>,
) -> Result<Json<FieldsResponse>> {
    let page = catalog.records(&sample_query()).await?;
    let descriptors = page.results.first().map(infer_fields).unwrap_or_default();
    Ok(Json(FieldsResponse::new(descriptors)))
}

pub async fn stats(
    State(catalog): State<Arc<dyn CatalogSource>>,
    Json(params): Json<StatsParams>,
) -> Result<Json<StatsResponse>> {
    let query = stats_query(&params)?;
    let page = catalog.records(&query).await?;
    Ok(Json(StatsResponse::new(page.results, params)))
}

pub async fn capabilities() -> Json<Value> {
    Json(json!({
        "service": "campus-catalog",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "REST interface over the US colleges and universities open-data catalog",
        "endpoints": [
            {
                "method": "POST",
                "path": "/api/search",
                "description": "Search universities by free text, state, or city",
                "body": {
                    "query": "free-text search (optional)",
                    "state": "two-letter state code (optional)",
                    "city": "city name (optional)",
                    "limit": "page size, max 100 (default 10)",
                    "offset": "page start (default 0)"
                }
            },
            {
                "method": "GET",
                "path": "/api/universities/:id",
                "description": "Fetch one university by object id"
            },
            {
                "method": "GET",
                "path": "/api/universities/name/:name",
                "description": "Fetch one university by exact name"
            },
            {
                "method": "GET",
                "path": "/api/fields",
                "description": "List dataset fields with inferred types"
            },
            {
                "method": "POST",
                "path": "/api/stats",
                "description": "Aggregate a dataset field, optionally grouped and filtered",
                "body": {
                    "field": "dataset field to aggregate (required)",
                    "aggregation": "one of count, sum, avg, min, max (required)",
                    "groupBy": "dataset field to group by (optional)",
                    "filter": "field-to-value equality map (optional)"
                }
            }
        ]
    }))
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "campus-catalog".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
