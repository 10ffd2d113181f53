pub mod api;
pub mod catalog;
pub mod client;
pub mod config;
pub mod utils;

pub use catalog::{CatalogClient, CatalogSource, FieldDescriptor, Record, RecordsPage};
pub use client::{CampusCatalogClient, ClientConfig};
pub use config::{CatalogConfig, ServerConfig};
pub use utils::error::{CatalogError, Result};
