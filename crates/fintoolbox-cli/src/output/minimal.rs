use serde_json::Value;

use super::{result_of, scalar};

/// Headline field per command, in priority order.
const PRIORITY_KEYS: &[&str] = &[
    "final_compound_amount",
    "annualized_rate",
    "rate",
    "npv",
    "total_score",
    "valid",
];

/// Print just the headline number of a result.
pub fn print_minimal(value: &Value) {
    let result = result_of(value);

    if let Value::Object(map) = result {
        let headline = PRIORITY_KEYS
            .iter()
            .find_map(|key| map.get(*key).filter(|v| !v.is_null()));
        if let Some(val) = headline {
            println!("{}", scalar(val));
            return;
        }
        // a failed solve has no rate; say why instead
        if let Some(Value::String(kind)) = map.get("error_kind") {
            println!("{}", kind);
            return;
        }
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, scalar(val));
            return;
        }
    }

    println!("{}", scalar(result));
}
