use serde_json::Value;

/// Renders an extracted JSON value as text.
///
/// Strings are returned without surrounding quotes; every other value is
/// rendered as its compact JSON form.
///
/// # Example
/// ```rust
/// use scraper_util::stringify_value;
/// use serde_json::json;
///
/// assert_eq!(stringify_value(&json!("hello")), "hello");
/// assert_eq!(stringify_value(&json!(42)), "42");
/// assert_eq!(stringify_value(&json!({"a": true})), r#"{"a":true}"#);
/// ```
pub fn stringify_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
