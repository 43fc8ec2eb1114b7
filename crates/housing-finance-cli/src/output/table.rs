use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use tabled::{builder::Builder, Table};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            // Check if "result" key holds the primary data
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(value);
            }
        }
        Value::Array(arr) => {
            print_array_table(arr);
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    if let Value::Object(res_map) = result {
        println!("{}", field_table(res_map));

        // Nested sections (comparison sides, schedule summary, schedule rows)
        for (key, val) in res_map {
            match val {
                Value::Object(section) => {
                    println!("\n{}:", key);
                    println!("{}", field_table(section));
                }
                Value::Array(rows) if rows.iter().all(Value::is_object) && !rows.is_empty() => {
                    println!("\n{}:", key);
                    print_array_table(rows);
                }
                _ => {}
            }
        }
    } else {
        print_flat_object(&Value::Object(envelope.clone()));
    }

    if let Some(Value::String(path)) = envelope.get("export_path") {
        println!("\nExported: {}", path);
    }

    // Print warnings if any
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    // Print methodology
    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Two-column table of the scalar fields in `map`.
fn field_table(map: &serde_json::Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if val.is_object() || val.is_array() {
            continue;
        }
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    Table::from(builder)
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        let table = Table::from(builder);
        println!("{}", table);
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    // Collect all keys from first object for headers
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        let table = Table::from(builder);
        println!("{}", table);
    } else {
        // Simple array of values
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

/// Render a JSON value for display. Decimal strings are shown at 2 dp.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => format_decimal_str(s).unwrap_or_else(|| s.clone()),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

fn format_decimal_str(s: &str) -> Option<String> {
    let d = Decimal::from_str(s).ok()?;
    if d.scale() > 2 {
        Some(format!("{:.2}", d.round_dp(2)))
    } else {
        Some(d.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decimal_strings_round_to_cents() {
        assert_eq!(format_value(&json!("1216.0405336693622")), "1216.04");
        assert_eq!(format_value(&json!("900")), "900");
        assert_eq!(format_value(&json!("Second")), "Second");
    }

    #[test]
    fn test_field_table_skips_nested_values() {
        let value = json!({"monthly_payment": "1000.456", "schedule": [{"a": 1}]});
        let table = field_table(value.as_object().unwrap()).to_string();
        assert!(table.contains("1000.46"));
        assert!(!table.contains("schedule"));
    }
}
