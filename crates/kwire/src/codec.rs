//
// codec.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
// Licensed under the Elastic License 2.0. See LICENSE.txt for license information.
//
//

//! JSON encoding of the four JSON parts of a wire message.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{InvalidArgument, WireError};

/// The encoding of an absent or empty part.
pub const EMPTY_PART: &[u8] = b"{}";

/// Encode a mapping as UTF-8 JSON. `None` and the empty mapping both encode
/// to `{}`.
///
/// The same map always encodes to the same bytes.
pub fn encode_part(
    field: &'static str,
    value: Option<&Map<String, Value>>,
) -> Result<Vec<u8>, InvalidArgument> {
    match value {
        Some(map) if !map.is_empty() => serde_json::to_vec(map)
            .map_err(|e| InvalidArgument::new(field, format!("not serializable: {}", e))),
        _ => Ok(EMPTY_PART.to_vec()),
    }
}

/// Decode one JSON part into a mapping. The part must be valid UTF-8 holding
/// a JSON object.
pub fn decode_part(part: &'static str, bytes: &[u8]) -> Result<Map<String, Value>, WireError> {
    let text = std::str::from_utf8(bytes).map_err(|e| WireError::Decode {
        part,
        reason: format!("invalid UTF-8: {}", e),
    })?;
    let value: Value = serde_json::from_str(text).map_err(|e| WireError::Decode {
        part,
        reason: format!("invalid JSON: {}", e),
    })?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(WireError::Decode {
            part,
            reason: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
    }
}

/// Convert an optional JSON value to a mapping, as accepted for the content,
/// metadata and parent header of an outbound message. `null` is treated as
/// absent.
pub fn as_mapping(
    field: &'static str,
    value: Option<Value>,
) -> Result<Option<Map<String, Value>>, InvalidArgument> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(InvalidArgument::new(
            field,
            format!("expected a JSON object, got {}", json_kind(&other)),
        )),
    }
}

/// Serialize a typed record into the mapping that goes on the wire.
pub fn encode_value<T: Serialize>(
    field: &'static str,
    value: &T,
) -> Result<Map<String, Value>, InvalidArgument> {
    let value = serde_json::to_value(value)
        .map_err(|e| InvalidArgument::new(field, format!("not serializable: {}", e)))?;
    as_mapping(field, Some(value)).map(Option::unwrap_or_default)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
