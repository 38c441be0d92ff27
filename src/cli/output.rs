//! JSON envelopes written to stdout.
//!
//! Every invocation prints exactly one object: `{"status": "success", ...}`
//! or `{"status": "error", "message": ...}`. Logs go to stderr.

use std::path::Path;

use serde::Serialize;
use serde_json::{Value, json};

/// `{"status": "success", "results": [...]}`
pub fn success_results<T: Serialize>(results: &T) -> anyhow::Result<Value> {
    Ok(json!({
        "status": "success",
        "results": serde_json::to_value(results)?,
    }))
}

/// `{"status": "success", "file_path": "..."}`
pub fn success_file(path: &Path) -> Value {
    json!({
        "status": "success",
        "file_path": path.to_string_lossy(),
    })
}

/// `{"status": "error", "message": "..."}`
pub fn error(message: &str) -> Value {
    json!({
        "status": "error",
        "message": message,
    })
}

/// Error envelope for a failed command.
///
/// Our error types already render their sources, so only the outermost
/// message is used.
pub fn failure(err: &anyhow::Error) -> Value {
    error(&err.to_string())
}

pub fn print(envelope: &Value) {
    println!("{envelope}");
}
