//! JSON output formatting

use crate::engine::MochaResult;
use serde_json::Value;

pub fn format_json(result: &MochaResult) -> String {
    let data = serde_json::to_value(result).unwrap_or(Value::Null);
    serde_json::to_string_pretty(&data).unwrap_or_else(|_| "{}".to_string())
}
