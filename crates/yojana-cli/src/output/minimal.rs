use serde_json::Value;

use super::format_value;

/// Print just the headline value from the output.
///
/// Looks for well-known result fields in priority order, then falls back to
/// the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_paths: [&[&str]; 4] = [
        &["metrics", "annualized_return_pct"],
        &["total_real"],
        &["amount"],
        &["failed_points"],
    ];

    for path in priority_paths {
        let found = path
            .iter()
            .try_fold(result_obj, |v, key| v.get(*key))
            .filter(|v| !v.is_null());
        if let Some(val) = found {
            println!("{}", format_value(val));
            return;
        }
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_value(val));
            return;
        }
    }

    println!("{}", format_value(result_obj));
}
