//! Heuristic search for a price field inside an untyped JSON document.
//!
//! Fragment does not publish a schema for its page state, so the price is located by key
//! name: the first finite number (depth-first, in key-declaration order) whose key contains
//! `price`, `rate` or `cost` and which falls strictly between 0 and 1.

use serde_json::Value;

const KEY_MARKERS: [&str; 3] = ["price", "rate", "cost"];

/// Returns the first plausible TON-per-star price found in `value`, if any.
pub fn find_price(value: &Value) -> Option<f64> {
    match value {
        Value::Object(map) => map.iter().find_map(|(key, entry)| match entry {
            Value::Number(n) => n
                .as_f64()
                .filter(|v| is_price_key(key) && in_range(*v)),
            Value::Object(_) | Value::Array(_) => find_price(entry),
            _ => None,
        }),
        // Array entries are keyed by index, which never matches, so only nested
        // containers can hold a candidate.
        Value::Array(items) => items.iter().find_map(|item| match item {
            Value::Object(_) | Value::Array(_) => find_price(item),
            _ => None,
        }),
        _ => None,
    }
}

fn is_price_key(key: &str) -> bool {
    let key = key.to_lowercase();
    KEY_MARKERS.iter().any(|marker| key.contains(marker))
}

fn in_range(value: f64) -> bool {
    value.is_finite() && value > 0.0 && value < 1.0
}
