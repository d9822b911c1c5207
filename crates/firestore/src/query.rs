//! Structured query filter construction.

use serde_json::{json, Value};

/// Errors produced while parsing a filter expression.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// The expression had no `=` separator.
    #[error("filter must be in field=value form, got {0:?}")]
    MissingSeparator(String),
}

/// Parse a `field=value` expression into the structured EQUAL filter the
/// query tool expects. The value side is always compared as a string.
pub fn parse_filter(raw: &str) -> Result<Value, FilterError> {
    let Some((field, value)) = raw.split_once('=') else {
        return Err(FilterError::MissingSeparator(raw.to_string()));
    };
    Ok(json!({
        "fieldFilter": {
            "field": { "fieldPath": field },
            "op": "EQUAL",
            "value": { "stringValue": value },
        }
    }))
}
