//! Encoding between plain JSON field mappings and Firestore's typed-value
//! wire format.
//!
//! Firestore documents carry explicitly-typed values. Integers travel as
//! decimal strings, and strings that parse as RFC 3339 instants are written
//! as `timestampValue` so the store indexes them as real timestamps.

use beacon_core::store::DocumentId;
use chrono::DateTime;
use serde_json::{Map, Value, json};

use crate::{Error, Result};

/// Wrap a plain JSON object as a Firestore document body:
/// `{"fields": {name: typedValue, …}}`.
pub fn encode_document(fields: &Value) -> Result<Value> {
  let map = fields.as_object().ok_or(Error::NotAnObject)?;
  Ok(json!({ "fields": encode_map(map)? }))
}

fn encode_map(map: &Map<String, Value>) -> Result<Value> {
  let mut out = Map::with_capacity(map.len());
  for (key, value) in map {
    out.insert(key.clone(), encode_value(value)?);
  }
  Ok(Value::Object(out))
}

/// Encode a single plain value as its typed Firestore counterpart.
pub fn encode_value(value: &Value) -> Result<Value> {
  Ok(match value {
    Value::Null => json!({ "nullValue": null }),
    Value::Bool(b) => json!({ "booleanValue": b }),
    Value::Number(n) => {
      if let Some(i) = n.as_i64() {
        json!({ "integerValue": i.to_string() })
      } else if let Some(f) = n.as_f64() {
        json!({ "doubleValue": f })
      } else {
        return Err(Error::UnsupportedValue(value.clone()));
      }
    }
    Value::String(s) => {
      if DateTime::parse_from_rfc3339(s).is_ok() {
        json!({ "timestampValue": s })
      } else {
        json!({ "stringValue": s })
      }
    }
    Value::Array(items) => {
      let values = items
        .iter()
        .map(encode_value)
        .collect::<Result<Vec<_>>>()?;
      json!({ "arrayValue": { "values": values } })
    }
    Value::Object(map) => {
      json!({ "mapValue": { "fields": encode_map(map)? } })
    }
  })
}

/// Extract the generated document id from a full resource name, e.g.
/// `projects/p/databases/(default)/documents/users/abc123` → `abc123`.
pub fn document_id_from_name(name: &str) -> Result<DocumentId> {
  name
    .rsplit('/')
    .next()
    .filter(|segment| !segment.is_empty())
    .map(DocumentId::new)
    .ok_or_else(|| {
      Error::MalformedResponse(format!(
        "document name {name:?} has no id segment"
      ))
    })
}
