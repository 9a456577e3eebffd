//! JSONPath extraction over cached documents.

use serde_json::Value;
use serde_json_path::JsonPath;
use tracing::debug;

use crate::EndpointError;

/// Applies `path` to `document` and returns every matching value in document order.
///
/// At least one match is required: a path that selects nothing is reported as
/// [`EndpointError::InvalidPath`], as is a path that does not parse.
///
/// # Example
/// ```rust
/// use scraper_engine::extract;
/// use serde_json::json;
///
/// let document = json!({"a": {"b": [1, 2, 3]}});
/// assert_eq!(extract(&document, "$.a.b[*]").unwrap(), vec![json!(1), json!(2), json!(3)]);
/// assert!(extract(&document, "$.z").is_err());
/// ```
pub fn extract(document: &Value, path: &str) -> Result<Vec<Value>, EndpointError> {
    let json_path = JsonPath::parse(path).map_err(|e| EndpointError::InvalidPath {
        path: path.to_string(),
        reason: e.to_string(),
    })?;

    let matches: Vec<Value> = json_path.query(document).all().into_iter().cloned().collect();
    debug!(%path, matches = matches.len(), "evaluated path");

    if matches.is_empty() {
        return Err(EndpointError::InvalidPath {
            path: path.to_string(),
            reason: "no match".to_string(),
        });
    }
    Ok(matches)
}

/// Selects the effective document root from a fetched body.
///
/// A base path starting with `$` is evaluated as JSONPath and its first match
/// is used. Any other base path names a top-level key of the body.
/// Returns `None` when nothing is selected.
pub fn select_base(body: Value, base_path: &str) -> Option<Value> {
    if base_path.starts_with('$') {
        return extract(&body, base_path).ok()?.into_iter().next();
    }
    match body {
        Value::Object(mut map) => map.remove(base_path),
        _ => None,
    }
}
