use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tera::{Result as TeraResult, Value};

/// Formats an RFC 3339 timestamp for display, e.g. `January 01, 2026 at 10:00 UTC`.
///
/// ```tera
/// {{ todo.createdAt | format_utc }}
/// ```
pub fn format_utc(value: &Value, _args: &HashMap<String, Value>) -> TeraResult<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("format_utc filter requires a string"))?;
    if s.is_empty() {
        return Ok(Value::String(String::new()));
    }

    let parsed = DateTime::parse_from_rfc3339(s)
        .map_err(|e| tera::Error::msg(format!("format_utc: invalid timestamp {s:?}: {e}")))?;
    let formatted = parsed
        .with_timezone(&Utc)
        .format("%B %d, %Y at %H:%M UTC")
        .to_string();
    Ok(Value::String(formatted))
}
