use serde_json::Value;
use std::io::{self, Write};

/// Pretty-print the output envelope to stdout, newline terminated.
pub fn print_json(value: &Value) {
    let mut out = io::stdout().lock();
    let written = serde_json::to_writer_pretty(&mut out, value)
        .map_err(io::Error::from)
        .and_then(|()| writeln!(out));
    if let Err(e) = written {
        log::error!("failed to write JSON output: {e}");
    }
}
