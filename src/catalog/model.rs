use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row from the catalog. The upstream API returns flat JSON objects
/// whose keys vary by dataset, so the fields stay dynamic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub fields: serde_json::Map<String, Value>,
}

impl Record {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// A page of records as the upstream returns it. Aggregation queries omit
/// `total_count`, so both fields default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordsPage {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub results: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub description: String,
}
