use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::model::{FieldDescriptor, Record, RecordsPage};
use crate::catalog::query::{SearchParams, StatsParams};
use crate::utils::error::CatalogError;

/// Envelope for search results. `data` is the upstream page untouched;
/// `metadata` echoes what the caller asked for.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub data: RecordsPage,
    pub metadata: SearchMetadata,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchMetadata {
    pub total: u64,
    pub offset: u32,
    pub limit: u32,
    pub query_parameters: QueryEcho,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryEcho {
    pub query: String,
    pub state: String,
    pub city: String,
}

impl SearchResponse {
    pub fn new(page: RecordsPage, params: &SearchParams) -> Self {
        let metadata = SearchMetadata {
            total: page.total_count,
            offset: params.offset,
            limit: params.limit,
            query_parameters: QueryEcho {
                query: params.query.clone(),
                state: params.state.clone(),
                city: params.city.clone(),
            },
        };
        Self {
            success: true,
            data: page,
            metadata,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LookupResponse {
    pub success: bool,
    pub data: Record,
}

impl LookupResponse {
    pub fn new(record: Record) -> Self {
        Self {
            success: true,
            data: record,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FieldsResponse {
    pub success: bool,
    pub data: Vec<FieldDescriptor>,
}

impl FieldsResponse {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self {
            success: true,
            data: fields,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub success: bool,
    pub data: Vec<Record>,
    pub metadata: StatsMetadata,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsMetadata {
    pub field: String,
    pub aggregation: String,
    #[serde(rename = "groupBy")]
    pub group_by: Option<String>,
    pub filter: Option<Map<String, Value>>,
}

impl StatsResponse {
    pub fn new(rows: Vec<Record>, params: StatsParams) -> Self {
        Self {
            success: true,
            data: rows,
            metadata: StatsMetadata {
                field: params.field,
                aggregation: params.aggregation,
                group_by: params.group_by,
                filter: params.filter,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub status: u16,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        Self {
            success: false,
            error: ErrorBody {
                message: message.into(),
                status,
            },
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status()).unwrap_or(StatusCode::BAD_GATEWAY);

        if status_code.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = ErrorResponse::new(self.public_message(), status_code.as_u16());
        (status_code, Json(body)).into_response()
    }
}
