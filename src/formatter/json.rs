//! JSON body formatting.

use serde_json::Value;

/// Pretty-prints a JSON value with 2-space indentation.
///
/// String values are shown raw, without quotes, since they usually hold a
/// non-JSON response body.
///
/// # Examples
///
/// ```
/// use api_tester::formatter::format_body;
/// use serde_json::json;
///
/// assert_eq!(format_body(&json!({ "id": 1 })), "{\n  \"id\": 1\n}");
/// assert_eq!(format_body(&json!("<html></html>")), "<html></html>");
/// ```
pub fn format_body(body: &Value) -> String {
    match body {
        Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}
