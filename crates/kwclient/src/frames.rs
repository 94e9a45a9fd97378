//
// frames.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
//
//

//! JSON rendering of frame lists, so they can be written to and read from a
//! terminal. UTF-8 frames are plain strings; any other frame is an object of
//! the form `{"hex": "..."}`.

use anyhow::{anyhow, bail, Context};
use serde_json::{json, Value};

pub fn frames_to_json(frames: &[Vec<u8>]) -> Value {
    Value::Array(
        frames
            .iter()
            .map(|frame| match std::str::from_utf8(frame) {
                Ok(text) => Value::String(text.to_string()),
                Err(_) => json!({ "hex": hex::encode(frame) }),
            })
            .collect(),
    )
}

pub fn frames_from_json(value: &Value) -> Result<Vec<Vec<u8>>, anyhow::Error> {
    let frames = value
        .as_array()
        .ok_or_else(|| anyhow!("Expected a JSON array of frames"))?;

    frames
        .iter()
        .enumerate()
        .map(|(index, frame)| match frame {
            Value::String(text) => Ok(text.as_bytes().to_vec()),
            Value::Object(obj) => {
                let encoded = obj
                    .get("hex")
                    .and_then(Value::as_str)
                    .ok_or_else(|| anyhow!("Frame {} is an object without a 'hex' field", index))?;
                hex::decode(encoded).with_context(|| format!("Frame {} is not valid hex", index))
            }
            _ => bail!("Frame {} must be a string or a {{\"hex\": ...}} object", index),
        })
        .collect()
}
