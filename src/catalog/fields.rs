use serde_json::Value;

use crate::catalog::model::{FieldDescriptor, Record};

/// Best-effort schema sketch from a single sample row. The dataset carries
/// no declared schema, so types are guessed per field.
pub fn infer_fields(sample: &Record) -> Vec<FieldDescriptor> {
    sample
        .fields
        .iter()
        .map(|(name, value)| FieldDescriptor {
            name: name.clone(),
            field_type: infer_type(name, value).to_string(),
            description: name.replace('_', " "),
        })
        .collect()
}

/// Name-based date detection wins over the numeric check: enrollment dates
/// and timestamps often arrive as numeric-looking strings.
fn infer_type(name: &str, value: &Value) -> &'static str {
    let lowered = name.to_lowercase();
    if lowered.contains("date") || lowered.contains("time") {
        return "date";
    }
    match value {
        Value::Number(_) => "number",
        Value::String(text) => {
            let trimmed = text.trim();
            if !trimmed.is_empty() && trimmed.parse::<f64>().is_ok() {
                "number"
            } else {
                "string"
            }
        }
        Value::Bool(_) => "boolean",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
        Value::Null => "null",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(value: serde_json::Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_date_name_beats_numeric_value() {
        let record = sample(json!({
            "name": "Foo U",
            "enrollment_date": "2020-01-01",
            "objectid": "5"
        }));
        let fields = infer_fields(&record);

        // serde_json maps iterate alphabetically.
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].name, "enrollment_date");
        assert_eq!(fields[0].field_type, "date");
        assert_eq!(fields[1].name, "name");
        assert_eq!(fields[1].field_type, "string");
        assert_eq!(fields[2].name, "objectid");
        assert_eq!(fields[2].field_type, "number");
    }

    #[test]
    fn test_numeric_strings_infer_as_number() {
        let record = sample(json!({"tot_enroll": "1523", "zip4": 1234}));
        let fields = infer_fields(&record);
        assert!(fields.iter().all(|f| f.field_type == "number"));
    }

    #[test]
    fn test_time_in_name_infers_as_date() {
        let record = sample(json!({"last_update_time": "1700000000"}));
        assert_eq!(infer_fields(&record)[0].field_type, "date");
    }

    #[test]
    fn test_description_replaces_underscores() {
        let record = sample(json!({"tot_enroll": "1523"}));
        assert_eq!(infer_fields(&record)[0].description, "tot enroll");
    }

    #[test]
    fn test_runtime_types_pass_through() {
        let record = sample(json!({
            "active": true,
            "aliases": ["a"],
            "extras": {"k": "v"},
            "note": null,
            "website": "https://example.edu"
        }));
        let fields = infer_fields(&record);
        let types: Vec<&str> = fields.iter().map(|f| f.field_type.as_str()).collect();
        assert_eq!(types, vec!["boolean", "array", "object", "null", "string"]);
    }

    #[test]
    fn test_empty_sample_yields_no_fields() {
        let record = sample(json!({}));
        assert!(infer_fields(&record).is_empty());
    }
}
