use std::fmt::Write as _;

use serde_json::Value;

use crate::error::SinkError;

pub(super) fn write_line(output: &mut String, line: &str) -> Result<(), SinkError> {
    writeln!(output, "{}", line).map_err(|err| SinkError::WriteLine { source: err })
}

/// Renders one response value as a CSV cell.
///
/// Strings are written without JSON quotes, `null` as an empty cell, and
/// everything else as compact JSON.
pub(super) fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            value.to_string()
        }
    }
}
