pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Keys holding the yearly or per-point series of a result, in lookup order.
pub const SERIES_KEYS: [&str; 3] = ["rows", "points", "cases"];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Split a result object into its scalar fields and its series, if any.
pub fn split_result(
    result: &serde_json::Map<String, Value>,
) -> (Vec<(&str, &Value)>, Option<&[Value]>) {
    let series = SERIES_KEYS
        .iter()
        .find_map(|k| result.get(*k).and_then(Value::as_array))
        .map(|a| a.as_slice());
    let scalars = result
        .iter()
        .filter(|(k, _)| !SERIES_KEYS.contains(&k.as_str()))
        .map(|(k, v)| (k.as_str(), v))
        .collect();
    (scalars, series)
}

pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
