use serde_json::Value;

/// Fields tried in order when picking the one value to print.
const PRIORITY_KEYS: [&str; 5] = [
    "winner",
    "home_price",
    "monthly_cash_flow",
    "monthly_payment",
    "total_interest",
];

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then inside a `summary` section, then fall back to the first field.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_answer(value));
}

fn minimal_answer(value: &Value) -> String {
    // Try to extract the "result" envelope
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        let summary = map.get("summary").and_then(Value::as_object);
        for scope in std::iter::once(map).chain(summary) {
            for key in &PRIORITY_KEYS {
                if let Some(val) = scope.get(*key) {
                    if !val.is_null() {
                        return format_minimal(val);
                    }
                }
            }
        }

        // Fall back to first field
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_minimal(val));
        }
    }

    // Not an object, just print directly
    format_minimal(result_obj)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
