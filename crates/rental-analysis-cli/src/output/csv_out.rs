use serde_json::Value;
use std::io;

use super::{result_of, scalar_text};

/// Write the result as a two-column `field,value` CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match result_of(value) {
        Value::Object(result) => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in result {
                let _ = wtr.write_record([key.as_str(), &scalar_text(val, "")]);
            }
        }
        other => {
            let _ = wtr.write_record([&scalar_text(other, "")]);
        }
    }

    let _ = wtr.flush();
}
