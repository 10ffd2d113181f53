use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use campus_catalog::utils::{logger, validation::Validate};
use campus_catalog::{CatalogClient, Result, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    logger::init_server_logger();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    info!("Starting campus-catalog server");
    info!(
        "Catalog: {} (dataset: {})",
        config.catalog.base_url, config.catalog.dataset
    );

    let catalog = Arc::new(CatalogClient::new(config.catalog.clone()));
    let app = campus_catalog::api::router(catalog);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("🚀 Listening on: {}", config.bind_addr());
    info!("API endpoints:");
    info!("  Health: GET /health");
    info!("  Search: POST /api/search");
    info!("  University by id: GET /api/universities/:id");
    info!("  University by name: GET /api/universities/name/:name");
    info!("  Fields: GET /api/fields");
    info!("  Stats: POST /api/stats");
    info!("  Capabilities: GET /api/capabilities");

    axum::serve(listener, app).await?;

    Ok(())
}
