//! snake_case <-> camelCase conversion for raw database rows

use serde_json::{Map, Value};

/// `image_url` -> `imageUrl`
pub fn snake_to_camel(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = false;
    for c in s.chars() {
        if c == '_' {
            // a leading underscore is kept as-is
            if out.is_empty() {
                out.push(c);
            } else {
                upper_next = true;
            }
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// `imageUrl` -> `image_url`
pub fn camel_to_snake(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if c.is_uppercase() {
            if !out.is_empty() {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn convert_keys(value: Value, convert: fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (convert(&k), convert_keys(v, convert)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|v| convert_keys(v, convert)).collect())
        }
        other => other,
    }
}

/// Recursively rename object keys to camelCase
pub fn keys_to_camel(value: Value) -> Value {
    convert_keys(value, snake_to_camel)
}

/// Recursively rename object keys to snake_case
pub fn keys_to_snake(value: Value) -> Value {
    convert_keys(value, camel_to_snake)
}
