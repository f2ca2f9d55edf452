use serde_json::Value;
use std::io;

use super::{flatten, result_of, scalar};

/// Write the result as CSV to stdout.
///
/// An interest projection becomes one `year,simple,compound` row per year;
/// anything else is a two-column `field,value` listing with nested keys
/// dotted and lists joined by `; `.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    let result = result_of(value);

    let written = match (result.get("simple"), result.get("compound")) {
        (Some(Value::Array(simple)), Some(Value::Array(compound))) => {
            write_series(&mut wtr, simple, compound)
        }
        _ => write_fields(&mut wtr, result),
    };
    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        eprintln!("CSV output error: {}", e);
    }
}

fn write_series<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    simple: &[Value],
    compound: &[Value],
) -> Result<(), csv::Error> {
    wtr.write_record(["year", "simple", "compound"])?;
    for (s, c) in simple.iter().zip(compound) {
        let year = s.get("year").map(scalar).unwrap_or_default();
        let simple_amount = s.get("amount").map(scalar).unwrap_or_default();
        let compound_amount = c.get("amount").map(scalar).unwrap_or_default();
        wtr.write_record([year, simple_amount, compound_amount])?;
    }
    Ok(())
}

fn write_fields<W: io::Write>(wtr: &mut csv::Writer<W>, result: &Value) -> Result<(), csv::Error> {
    let mut fields = Vec::new();
    flatten("", result, &mut fields);

    wtr.write_record(["field", "value"])?;
    for (key, val) in fields {
        let rendered = match &val {
            Value::Array(items) => items.iter().map(scalar).collect::<Vec<_>>().join("; "),
            other => scalar(other),
        };
        wtr.write_record([key, rendered])?;
    }
    Ok(())
}
