//! The typed-value codec.
//!
//! Encoding is total: every plain JSON value has a tagged form. Decoding
//! recognizes the tags the server emits; a mapping that carries none of
//! them is treated as untagged data and returned unchanged, since server
//! responses mix tagged and untagged fields. Integers travel as decimal
//! strings on the wire, so `decode(encode(v)) == v` holds for every shape
//! the encoder produces.

use base64::Engine as _;
use serde_json::{json, Map, Value};

/// Errors produced while decoding a tagged value.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    /// An `integerValue` payload was not a decimal integer literal.
    #[error("invalid integerValue payload: {0}")]
    InvalidInteger(String),
}

/// Encode a plain JSON value into Firestore's tagged representation.
///
/// Integer-representable numbers become `integerValue` strings; any other
/// number becomes `doubleValue`. A number representable as neither (only
/// possible with exotic `Number` contents) falls back to its textual
/// rendering as a `stringValue`.
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                json!({ "integerValue": i.to_string() })
            } else if let Some(u) = n.as_u64() {
                json!({ "integerValue": u.to_string() })
            } else if let Some(f) = n.as_f64() {
                json!({ "doubleValue": f })
            } else {
                json!({ "stringValue": n.to_string() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(fields) => {
            let fields: Map<String, Value> = fields
                .iter()
                .map(|(k, v)| (k.clone(), encode_value(v)))
                .collect();
            json!({ "mapValue": { "fields": fields } })
        }
    }
}

/// Decode a Firestore tagged value into a plain JSON value.
///
/// `timestampValue`, `referenceValue`, and `geoPointValue` pass their
/// payload through untouched. `bytesValue` decodes to a `<bytes:N>`
/// descriptor carrying only the payload's byte length. Inputs that are
/// not tagged mappings are returned unchanged.
pub fn decode_value(value: &Value) -> Result<Value, ValueError> {
    let Some(tagged) = value.as_object() else {
        return Ok(value.clone());
    };

    if let Some(s) = tagged.get("stringValue") {
        return Ok(s.clone());
    }
    if let Some(raw) = tagged.get("integerValue") {
        return decode_integer(raw);
    }
    if let Some(n) = tagged.get("doubleValue") {
        return Ok(n.clone());
    }
    if let Some(b) = tagged.get("booleanValue") {
        return Ok(b.clone());
    }
    if tagged.contains_key("nullValue") {
        return Ok(Value::Null);
    }
    if let Some(ts) = tagged.get("timestampValue") {
        return Ok(ts.clone());
    }
    if let Some(array) = tagged.get("arrayValue") {
        let items = match array.get("values").and_then(Value::as_array) {
            Some(values) => values.as_slice(),
            None => &[],
        };
        let decoded = items.iter().map(decode_value).collect::<Result<Vec<_>, _>>()?;
        return Ok(Value::Array(decoded));
    }
    if let Some(map) = tagged.get("mapValue") {
        let mut decoded = Map::new();
        if let Some(fields) = map.get("fields").and_then(Value::as_object) {
            for (k, v) in fields {
                decoded.insert(k.clone(), decode_value(v)?);
            }
        }
        return Ok(Value::Object(decoded));
    }
    if let Some(r) = tagged.get("referenceValue") {
        return Ok(r.clone());
    }
    if let Some(g) = tagged.get("geoPointValue") {
        return Ok(g.clone());
    }
    if let Some(bytes) = tagged.get("bytesValue") {
        return Ok(bytes_descriptor(bytes));
    }

    // No recognized tag: not a typed value, pass it through.
    Ok(value.clone())
}

/// Parse an `integerValue` payload. Values past `i64::MAX` are retried as
/// `u64`, covering the full range a 64-bit integerValue can carry.
fn decode_integer(raw: &Value) -> Result<Value, ValueError> {
    let Some(text) = raw.as_str() else {
        return Err(ValueError::InvalidInteger(raw.to_string()));
    };
    if let Ok(i) = text.parse::<i64>() {
        return Ok(Value::from(i));
    }
    match text.parse::<u64>() {
        Ok(u) => Ok(Value::from(u)),
        Err(_) => Err(ValueError::InvalidInteger(text.to_string())),
    }
}

/// Replace a `bytesValue` payload with a descriptor carrying its decoded
/// byte length. The content itself is not kept.
fn bytes_descriptor(payload: &Value) -> Value {
    match payload.as_str() {
        Some(text) => {
            let len = base64::engine::general_purpose::STANDARD
                .decode(text)
                .map(|bytes| bytes.len())
                .unwrap_or(text.len());
            Value::String(format!("<bytes:{}>", len))
        }
        None => payload.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(value: Value) {
        let decoded = decode_value(&encode_value(&value)).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_encode_null() {
        assert_eq!(encode_value(&Value::Null), json!({"nullValue": null}));
    }

    #[test]
    fn test_encode_integer_as_string() {
        assert_eq!(encode_value(&json!(42)), json!({"integerValue": "42"}));
        assert_eq!(encode_value(&json!(-7)), json!({"integerValue": "-7"}));
    }

    #[test]
    fn test_encode_double() {
        assert_eq!(encode_value(&json!(1.5)), json!({"doubleValue": 1.5}));
    }

    #[test]
    fn test_encode_array_preserves_order() {
        assert_eq!(
            encode_value(&json!([1, "a", true])),
            json!({"arrayValue": {"values": [
                {"integerValue": "1"},
                {"stringValue": "a"},
                {"booleanValue": true},
            ]}})
        );
    }

    #[test]
    fn test_encode_nested_map() {
        assert_eq!(
            encode_value(&json!({"x": 1, "y": {"z": 2}})),
            json!({"mapValue": {"fields": {
                "x": {"integerValue": "1"},
                "y": {"mapValue": {"fields": {"z": {"integerValue": "2"}}}},
            }}})
        );
    }

    #[test]
    fn test_decode_null() {
        assert_eq!(decode_value(&json!({"nullValue": null})).unwrap(), Value::Null);
    }

    #[test]
    fn test_decode_integer() {
        assert_eq!(decode_value(&json!({"integerValue": "42"})).unwrap(), json!(42));
        assert_eq!(decode_value(&json!({"integerValue": "-7"})).unwrap(), json!(-7));
    }

    #[test]
    fn test_decode_integer_beyond_i64() {
        assert_eq!(
            decode_value(&json!({"integerValue": "18446744073709551615"})).unwrap(),
            json!(u64::MAX)
        );
    }

    #[test]
    fn test_decode_invalid_integer() {
        assert!(matches!(
            decode_value(&json!({"integerValue": "abc"})),
            Err(ValueError::InvalidInteger(_))
        ));
        // A non-string payload is just as invalid; never coerce.
        assert!(matches!(
            decode_value(&json!({"integerValue": null})),
            Err(ValueError::InvalidInteger(_))
        ));
    }

    #[test]
    fn test_decode_timestamp_passthrough() {
        assert_eq!(
            decode_value(&json!({"timestampValue": "2024-01-01T00:00:00Z"})).unwrap(),
            json!("2024-01-01T00:00:00Z")
        );
    }

    #[test]
    fn test_decode_reference_and_geopoint_passthrough() {
        assert_eq!(
            decode_value(&json!({"referenceValue": "projects/p/databases/(default)/documents/users/u1"}))
                .unwrap(),
            json!("projects/p/databases/(default)/documents/users/u1")
        );
        assert_eq!(
            decode_value(&json!({"geoPointValue": {"latitude": 1.0, "longitude": 2.0}})).unwrap(),
            json!({"latitude": 1.0, "longitude": 2.0})
        );
    }

    #[test]
    fn test_decode_bytes_descriptor() {
        // "AAAA" is 3 bytes of base64; the content is discarded.
        assert_eq!(
            decode_value(&json!({"bytesValue": "AAAA"})).unwrap(),
            json!("<bytes:3>")
        );
    }

    #[test]
    fn test_decode_bytes_invalid_base64_uses_raw_length() {
        assert_eq!(
            decode_value(&json!({"bytesValue": "???"})).unwrap(),
            json!("<bytes:3>")
        );
    }

    #[test]
    fn test_decode_array_missing_values_is_empty() {
        assert_eq!(decode_value(&json!({"arrayValue": {}})).unwrap(), json!([]));
    }

    #[test]
    fn test_decode_map_missing_fields_is_empty() {
        assert_eq!(decode_value(&json!({"mapValue": {}})).unwrap(), json!({}));
    }

    #[test]
    fn test_decode_nested_parse_error_propagates() {
        let tagged = json!({"arrayValue": {"values": [{"integerValue": "nope"}]}});
        assert!(matches!(
            decode_value(&tagged),
            Err(ValueError::InvalidInteger(_))
        ));
    }

    #[test]
    fn test_decode_unrecognized_tag_passthrough() {
        assert_eq!(
            decode_value(&json!({"foo": "bar"})).unwrap(),
            json!({"foo": "bar"})
        );
    }

    #[test]
    fn test_decode_non_object_passthrough() {
        assert_eq!(decode_value(&json!("plain")).unwrap(), json!("plain"));
        assert_eq!(decode_value(&json!(3)).unwrap(), json!(3));
    }

    #[test]
    fn test_roundtrip_scalars() {
        roundtrip(Value::Null);
        roundtrip(json!(true));
        roundtrip(json!(false));
        roundtrip(json!(0));
        roundtrip(json!(i64::MIN));
        roundtrip(json!(u64::MAX));
        roundtrip(json!(2.25));
        roundtrip(json!("hello"));
        roundtrip(json!(""));
    }

    #[test]
    fn test_roundtrip_containers() {
        roundtrip(json!([]));
        roundtrip(json!({}));
        roundtrip(json!([1, [2, [3]], {"k": null}]));
        roundtrip(json!({
            "name": "John",
            "age": 30,
            "score": 99.5,
            "active": true,
            "tags": ["a", "b"],
            "address": {"city": "Berlin", "zip": "10115"},
        }));
    }
}
