pub mod extract;
pub mod handlers;
pub mod responses;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::catalog::upstream::CatalogSource;

use handlers::{
    capabilities, fields, health, search, stats, university_by_id, university_by_name,
};

pub fn router(catalog: Arc<dyn CatalogSource>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/search", post(search))
        .route("/api/universities/:id", get(university_by_id))
        .route("/api/universities/name/:name", get(university_by_name))
        .route("/api/fields", get(fields))
        .route("/api/stats", post(stats))
        .route("/api/capabilities", get(capabilities))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(catalog)
}
