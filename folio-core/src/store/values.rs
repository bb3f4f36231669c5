//! Conversion between plain JSON and Firestore's typed value encoding
//!
//! Firestore's REST API wraps every value in a single-key object naming its
//! type (`{"stringValue": "x"}`, `{"arrayValue": {"values": [...]}}`, ...).
//! Timestamps come back as RFC 3339 strings, integers as decimal strings.

use serde_json::{json, Map, Number, Value};

use super::{Fields, StoreError};

/// Encode a JSON value as a Firestore value
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64().unwrap_or_default() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

/// Encode a document's fields
pub fn encode_fields(fields: &Fields) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(k, v)| (k.clone(), encode_value(v)))
            .collect(),
    )
}

/// Decode a Firestore value into plain JSON
pub fn decode_value(value: &Value) -> Result<Value, StoreError> {
    let Some((kind, inner)) = value.as_object().and_then(|o| o.iter().next()) else {
        return Err(StoreError::Decode(format!("Not a typed value: {value}")));
    };

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => inner
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| decode_error(kind, inner)),
        "integerValue" => {
            let parsed = match inner {
                Value::String(s) => s.parse::<i64>().ok(),
                Value::Number(n) => n.as_i64(),
                _ => None,
            };
            parsed
                .map(|i| Value::Number(i.into()))
                .ok_or_else(|| decode_error(kind, inner))
        }
        "doubleValue" => match inner {
            // Non-finite doubles arrive as strings and have no JSON form
            Value::String(s) if matches!(s.as_str(), "NaN" | "Infinity" | "-Infinity") => {
                Ok(Value::Null)
            }
            _ => inner
                .as_f64()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| decode_error(kind, inner)),
        },
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| decode_error(kind, inner)),
        "arrayValue" => {
            let values = inner
                .get("values")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(decode_value).collect::<Result<Vec<_>, _>>())
                .transpose()?
                .unwrap_or_default();
            Ok(Value::Array(values))
        }
        "mapValue" => {
            let fields = match inner.get("fields") {
                Some(fields) => decode_fields(fields)?,
                None => Map::new(),
            };
            Ok(Value::Object(fields))
        }
        "geoPointValue" => Ok(inner.clone()),
        other => Err(StoreError::Decode(format!("Unsupported value type '{other}'"))),
    }
}

/// Decode a document's `fields` object
pub fn decode_fields(fields: &Value) -> Result<Fields, StoreError> {
    let Some(object) = fields.as_object() else {
        return Err(StoreError::Decode(format!("Fields are not an object: {fields}")));
    };

    object
        .iter()
        .map(|(k, v)| decode_value(v).map(|decoded| (k.clone(), decoded)))
        .collect()
}

fn decode_error(kind: &str, inner: &Value) -> StoreError {
    StoreError::Decode(format!("Invalid {kind}: {inner}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_project_fields() {
        let Value::Object(fields) = json!({
            "title": "Burger",
            "tags": ["Food", "Promo"],
            "views": 3
        }) else {
            unreachable!()
        };

        assert_eq!(
            encode_fields(&fields),
            json!({
                "title": {"stringValue": "Burger"},
                "tags": {"arrayValue": {"values": [
                    {"stringValue": "Food"},
                    {"stringValue": "Promo"}
                ]}},
                "views": {"integerValue": "3"}
            })
        );
    }

    #[test]
    fn test_decode_mixed_document() {
        let decoded = decode_fields(&json!({
            "title": {"stringValue": "Pizza"},
            "createdAt": {"timestampValue": "2025-02-01T00:00:00Z"},
            "featured": {"booleanValue": true},
            "rating": {"doubleValue": 4.5},
            "empty": {"arrayValue": {}},
            "meta": {"mapValue": {"fields": {"n": {"integerValue": "7"}}}},
            "gone": {"nullValue": null}
        }))
        .unwrap();

        assert_eq!(
            Value::Object(decoded),
            json!({
                "title": "Pizza",
                "createdAt": "2025-02-01T00:00:00Z",
                "featured": true,
                "rating": 4.5,
                "empty": [],
                "meta": {"n": 7},
                "gone": null
            })
        );
    }

    #[test]
    fn test_encoded_values_decode_back() {
        let original = json!({"a": "x", "b": [1, "two", false], "c": {"d": null}});
        let Value::Object(fields) = original.clone() else {
            unreachable!()
        };
        let decoded = decode_fields(&encode_fields(&fields)).unwrap();
        assert_eq!(Value::Object(decoded), original);
    }

    #[test]
    fn test_non_finite_doubles_decode_to_null() {
        let decoded = decode_fields(&json!({
            "title": {"stringValue": "T"},
            "score": {"doubleValue": "NaN"},
            "high": {"doubleValue": "Infinity"},
            "low": {"doubleValue": "-Infinity"}
        }))
        .unwrap();

        assert_eq!(decoded["title"], json!("T"));
        assert_eq!(decoded["score"], Value::Null);
        assert_eq!(decoded["high"], Value::Null);
        assert_eq!(decoded["low"], Value::Null);
        assert!(decode_value(&json!({"doubleValue": "1.5"})).is_err());
    }

    #[test]
    fn test_unknown_type_is_decode_error() {
        let result = decode_value(&json!({"mysteryValue": 1}));
        assert!(matches!(result, Err(StoreError::Decode(_))));
    }
}
