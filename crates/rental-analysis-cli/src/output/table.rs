use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{result_of, scalar_text};

/// Format the result as a Field/Value table, followed by any warnings and
/// the methodology line.
pub fn print_table(value: &Value) {
    match result_of(value) {
        Value::Object(res_map) => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in res_map {
                builder.push_record([key.as_str(), &scalar_text(val, "null")]);
            }
            println!("{}", Table::from(builder));
        }
        other => println!("{}", scalar_text(other, "null")),
    }

    let Some(envelope) = value.as_object() else {
        return;
    };

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
