pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
///
/// Formats that only show the result still surface the envelope's warnings,
/// on stderr so piped output stays clean.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("JSON serialization error: {}", e),
        },
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => {
            csv_out::print_csv(value);
            warnings_to_stderr(value);
        }
        OutputFormat::Minimal => {
            minimal::print_minimal(value);
            warnings_to_stderr(value);
        }
    }
}

fn warnings_to_stderr(value: &Value) {
    if let Some(Value::Array(warnings)) = value.get("warnings") {
        for w in warnings.iter().filter_map(Value::as_str) {
            eprintln!("warning: {}", w);
        }
    }
}

/// Scalar rendering shared by the text formatters.
pub(crate) fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Flatten nested objects into `parent.child` keys; arrays are left whole.
pub(crate) fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, Value)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let name = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&name, val, out);
            }
        }
        other => out.push((prefix.to_string(), other.clone())),
    }
}

/// The `result` of an envelope, or the value itself.
pub(crate) fn result_of(value: &Value) -> &Value {
    value.get("result").unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_dots_nested_keys_and_keeps_arrays() {
        let value = json!({
            "total_score": "19.7",
            "category_scores": {"housing": "50", "debt": "0"},
            "suggestions": ["a", "b"],
        });
        let mut fields = Vec::new();
        flatten("", &value, &mut fields);
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec!["category_scores.debt", "category_scores.housing", "suggestions", "total_score"]
        );
        assert!(fields[2].1.is_array());
    }

    #[test]
    fn test_result_of_unwraps_envelope() {
        let envelope = json!({"result": {"npv": "100"}, "warnings": []});
        assert_eq!(result_of(&envelope), &json!({"npv": "100"}));
        let bare = json!([1, 2]);
        assert_eq!(result_of(&bare), &bare);
    }

    #[test]
    fn test_scalar_renders_null_as_empty() {
        assert_eq!(scalar(&Value::Null), "");
        assert_eq!(scalar(&json!("0.0981")), "0.0981");
        assert_eq!(scalar(&json!(true)), "true");
    }
}
