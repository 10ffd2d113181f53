use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::validate_field_identifier;

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Dataset fields the lookup endpoints key on.
pub const ID_FIELD: &str = "objectid";
pub const NAME_FIELD: &str = "name";

/// Query parameters for the upstream records endpoint. Only `Some` fields
/// are sent on the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordsQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub where_clause: Option<String>,
    pub q: Option<String>,
    pub select: Option<String>,
    pub group_by: Option<String>,
}

impl RecordsQuery {
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(where_clause) = &self.where_clause {
            pairs.push(("where", where_clause.clone()));
        }
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        if let Some(select) = &self.select {
            pairs.push(("select", select.clone()));
        }
        if let Some(group_by) = &self.group_by {
            pairs.push(("group_by", group_by.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub city: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: String::new(),
            state: String::new(),
            city: String::new(),
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsParams {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub aggregation: String,
    #[serde(default, rename = "groupBy")]
    pub group_by: Option<String>,
    #[serde(default)]
    pub filter: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl Aggregation {
    pub const VALID: [&'static str; 5] = ["count", "sum", "avg", "min", "max"];

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "count" => Ok(Self::Count),
            "sum" => Ok(Self::Sum),
            "avg" => Ok(Self::Avg),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            other => Err(CatalogError::validation(format!(
                "Unsupported aggregation: {}. Valid aggregations: {}",
                other,
                Self::VALID.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Sum => "sum",
            Self::Avg => "avg",
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    /// Column alias used in the select expression.
    pub fn alias(&self) -> &'static str {
        match self {
            Self::Avg => "average",
            other => other.as_str(),
        }
    }
}

/// Doubles single quotes so a literal can be spliced into an ODSQL
/// string without terminating it early.
fn quote_literal(value: &str) -> String {
    value.replace('\'', "''")
}

fn equality(field: &str, value: &str) -> String {
    format!("{} = '{}'", field, quote_literal(value))
}

pub fn search_query(params: &SearchParams) -> Result<RecordsQuery> {
    if params.limit > MAX_LIMIT {
        return Err(CatalogError::validation(format!(
            "limit must not exceed {}",
            MAX_LIMIT
        )));
    }

    let mut clauses = Vec::new();
    if !params.state.is_empty() {
        clauses.push(equality("state", &params.state));
    }
    if !params.city.is_empty() {
        clauses.push(equality("city", &params.city));
    }

    Ok(RecordsQuery {
        limit: Some(params.limit),
        offset: Some(params.offset),
        where_clause: (!clauses.is_empty()).then(|| clauses.join(" AND ")),
        q: (!params.query.is_empty()).then(|| params.query.clone()),
        ..Default::default()
    })
}

/// Singular lookup on one field. The value arrives from a path segment and
/// is quoted, so apostrophes in names survive the trip.
pub fn lookup_query(field: &str, value: &str) -> RecordsQuery {
    RecordsQuery {
        limit: Some(1),
        where_clause: Some(equality(field, value)),
        ..Default::default()
    }
}

/// One sample row, enough to sketch the dataset schema from.
pub fn sample_query() -> RecordsQuery {
    RecordsQuery {
        limit: Some(1),
        ..Default::default()
    }
}

pub fn stats_query(params: &StatsParams) -> Result<RecordsQuery> {
    if params.field.is_empty() || params.aggregation.is_empty() {
        return Err(CatalogError::validation("field and aggregation are required"));
    }
    let aggregation = Aggregation::parse(&params.aggregation)?;

    let select = match aggregation {
        Aggregation::Count => "count(*) as count".to_string(),
        agg => {
            validate_field_identifier("field", &params.field)?;
            // Numeric-looking columns are stored as text upstream, so the
            // aggregate input has to be cast first.
            format!("{}(int({})) as {}", agg.as_str(), params.field, agg.alias())
        }
    };

    let group_by = match &params.group_by {
        Some(group_by) if !group_by.is_empty() => {
            validate_field_identifier("groupBy", group_by)?;
            Some(group_by.clone())
        }
        _ => None,
    };

    let where_clause = match &params.filter {
        Some(filter) if !filter.is_empty() => Some(filter_clause(filter)?),
        _ => None,
    };

    Ok(RecordsQuery {
        select: Some(select),
        group_by,
        where_clause,
        ..Default::default()
    })
}

fn filter_clause(filter: &Map<String, Value>) -> Result<String> {
    let mut clauses = Vec::with_capacity(filter.len());
    for (key, value) in filter {
        validate_field_identifier("filter key", key)?;
        let clause = match value {
            Value::String(literal) => equality(key, literal),
            Value::Number(number) => format!("{} = {}", key, number),
            Value::Bool(flag) => format!("{} = {}", key, flag),
            _ => {
                return Err(CatalogError::validation(format!(
                    "filter value for '{}' must be a string, number, or boolean",
                    key
                )))
            }
        };
        clauses.push(clause);
    }
    Ok(clauses.join(" AND "))
}
