use serde_json::Value;

use super::{result_of, scalar_text};

/// Headline figures, most important first.
const PRIORITY_KEYS: [&str; 4] = [
    "roi",
    "annual_cash_flow",
    "monthly_mortgage",
    "total_monthly_expenses",
];

/// Print just the key answer value from the output.
///
/// Picks the first headline figure present in the result, falling back to
/// the first field.
pub fn print_minimal(value: &Value) {
    let result_obj = result_of(value);

    if let Value::Object(map) = result_obj {
        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key).filter(|v| !v.is_null()) {
                println!("{}", scalar_text(val, "null"));
                return;
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, scalar_text(val, "null"));
            return;
        }
    }

    println!("{}", scalar_text(result_obj, "null"));
}
