use once_cell::sync::Lazy;
use regex::Regex;
use scraper_types::Parameters;
use tracing::debug;

static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%([A-Za-z_][A-Za-z0-9_]*)").expect("placeholder regex should compile"));

/// Resolves an endpoint URL template by substituting `%key` placeholders.
///
/// When `api_base` is present it is prepended to the template before any
/// substitution takes place, so placeholders inside the base are resolved too.
/// Pairs are applied in order and each replaces every occurrence of its
/// `%key` token literally: neither keys nor values carry pattern semantics.
///
/// Placeholders without a matching parameter are left verbatim in the output,
/// and parameters without a matching placeholder are ignored.
///
/// # Arguments
/// - `template`: URL or path containing placeholders in the format `%key`
/// - `api_base`: optional prefix joined in front of `template`
/// - `parameters`: ordered key/value pairs to substitute
///
/// # Examples
/// ```rust
/// use scraper_types::Parameters;
/// use scraper_util::resolve_endpoint_url;
///
/// let params = Parameters::new([("id", "42")]);
/// let url = resolve_endpoint_url("/items/%id/detail", None, &params);
/// assert_eq!(url, "/items/42/detail");
///
/// // Missing placeholder remains unchanged
/// let url = resolve_endpoint_url("/items/%id/%missing", Some("https://api.example.com"), &params);
/// assert_eq!(url, "https://api.example.com/items/42/%missing");
/// ```
pub fn resolve_endpoint_url(template: &str, api_base: Option<&str>, parameters: &Parameters) -> String {
    let mut url = match api_base {
        Some(base) => format!("{base}{template}"),
        None => template.to_string(),
    };
    for (key, value) in parameters.iter() {
        url = replace_placeholder(&url, key, value);
    }
    debug!(%url, "resolved endpoint url");
    url
}

/// Replaces every literal `%key` token in `input` with `value`.
fn replace_placeholder(input: &str, key: &str, value: &str) -> String {
    let needle = format!("%{key}");
    input.replace(&needle, value)
}

/// Lists the distinct `%name` placeholder names of a template in order of
/// first appearance.
///
/// Names start with a letter or underscore, so percent-encoded bytes such as
/// `%20` are not reported.
pub fn template_placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for captures in PLACEHOLDER_REGEX.captures_iter(template) {
        let name = &captures[1];
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_string());
        }
    }
    names
}
