//! crates/material_tracker_core/src/casing.rs
//!
//! Field-name casing conversion between the caller-facing camelCase schema
//! and the snake_case column names the remote store uses. The conversion is
//! applied to every remote request body and every remote response body, and
//! it must be lossless: `snake_to_camel(camel_to_snake(k)) == k` for every
//! key in the schema.

use serde_json::{Map, Value};

/// Converts one camelCase key to snake_case (`materialType` -> `material_type`).
pub fn camel_to_snake(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Converts one snake_case key to camelCase (`material_type` -> `materialType`).
pub fn snake_to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for c in key.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Rewrites the top-level keys of a JSON object to snake_case. Non-object
/// values pass through unchanged; nesting is not traversed because the
/// schema is flat.
pub fn keys_to_snake(value: &Value) -> Value {
    rewrite_keys(value, camel_to_snake)
}

/// Rewrites the top-level keys of a JSON object to camelCase.
pub fn keys_to_camel(value: &Value) -> Value {
    rewrite_keys(value, snake_to_camel)
}

fn rewrite_keys(value: &Value, convert: fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, inner) in map {
                out.insert(convert(key), inner.clone());
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}
