//! Document-level encode/decode helpers.
//!
//! A Firestore document arrives as `{"name": "...", "fields": {...}}` with
//! every field in tagged form. `decode_document` flattens the fields back
//! to plain JSON; `encode_fields` is the write-side counterpart used when
//! adding documents.

use serde_json::{json, Map, Value};

use crate::value::{decode_value, encode_value, ValueError};

/// Decode a document's `fields` map into a plain JSON object.
///
/// Inputs without a `fields` object (error payloads, already-plain data)
/// are returned unchanged.
pub fn decode_document(doc: &Value) -> Result<Value, ValueError> {
    let Some(fields) = doc.get("fields").and_then(Value::as_object) else {
        return Ok(doc.clone());
    };
    let mut decoded = Map::new();
    for (k, v) in fields {
        decoded.insert(k.clone(), decode_value(v)?);
    }
    Ok(Value::Object(decoded))
}

/// Encode a plain JSON object into a `{"fields": {...}}` document body.
pub fn encode_fields(data: &Map<String, Value>) -> Value {
    let fields: Map<String, Value> = data
        .iter()
        .map(|(k, v)| (k.clone(), encode_value(v)))
        .collect();
    json!({ "fields": fields })
}

/// Extract the short document path from a fully-qualified resource name.
///
/// `projects/p/databases/(default)/documents/users/u1` becomes `users/u1`.
/// Names without a `/documents/` segment are returned whole.
pub fn document_path(name: &str) -> &str {
    match name.rsplit_once("/documents/") {
        Some((_, path)) => path,
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_document_fields() {
        let doc = json!({
            "name": "projects/p/databases/(default)/documents/users/u1",
            "fields": {
                "name": {"stringValue": "John"},
                "age": {"integerValue": "30"},
            },
        });
        assert_eq!(
            decode_document(&doc).unwrap(),
            json!({"name": "John", "age": 30})
        );
    }

    #[test]
    fn test_decode_document_without_fields_passthrough() {
        let doc = json!({"error": "NOT_FOUND"});
        assert_eq!(decode_document(&doc).unwrap(), doc);
    }

    #[test]
    fn test_decode_document_propagates_value_error() {
        let doc = json!({"fields": {"n": {"integerValue": "x"}}});
        assert!(decode_document(&doc).is_err());
    }

    #[test]
    fn test_encode_fields() {
        let data = json!({"name": "John", "active": true});
        let encoded = encode_fields(data.as_object().unwrap());
        assert_eq!(
            encoded,
            json!({"fields": {
                "name": {"stringValue": "John"},
                "active": {"booleanValue": true},
            }})
        );
    }

    #[test]
    fn test_document_path() {
        assert_eq!(
            document_path("projects/p/databases/(default)/documents/users/u1"),
            "users/u1"
        );
        assert_eq!(document_path("users/u1"), "users/u1");
    }
}
