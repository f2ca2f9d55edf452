use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten, result_of, scalar};

/// Field/value table for the result, one table per embedded record list
/// (e.g. interest series), then suggestions, warnings and methodology.
pub fn print_table(value: &Value) {
    let result = result_of(value);
    let Value::Object(map) = result else {
        println!("{}", scalar(result));
        return;
    };

    let mut fields = Vec::new();
    flatten("", result, &mut fields);

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in fields.iter().filter(|(_, v)| !v.is_array()) {
        builder.push_record([key.as_str(), &scalar(val)]);
    }
    println!("{}", Table::from(builder));

    for (key, val) in map {
        if let Value::Array(items) = val {
            print_list(key, items);
        }
    }

    if let Value::Object(envelope) = value {
        print_envelope_notes(envelope);
    }
}

fn print_list(name: &str, items: &[Value]) {
    if items.is_empty() {
        return;
    }
    println!("\n{}:", name);

    let Some(Value::Object(first)) = items.first() else {
        for item in items {
            println!("  - {}", scalar(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for item in items {
        if let Value::Object(row) = item {
            builder.push_record(
                headers
                    .iter()
                    .map(|h| row.get(h.as_str()).map(scalar).unwrap_or_default()),
            );
        }
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
