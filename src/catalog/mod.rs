pub mod fields;
pub mod model;
pub mod query;
pub mod upstream;

pub use model::{FieldDescriptor, Record, RecordsPage};
pub use query::{RecordsQuery, SearchParams, StatsParams};
pub use upstream::{CatalogClient, CatalogSource};
