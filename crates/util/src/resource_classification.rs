//! # Resource Classification
//!
//! Decides whether an extracted string points at an image resource that should
//! be fetched as bytes instead of being returned as text.

use url::Url;

/// Path suffixes recognised as image resources.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png"];

/// Returns `true` when `candidate` is an absolute URL whose path ends with one
/// of [`SUPPORTED_IMAGE_EXTENSIONS`].
///
/// Only the path component is inspected, so query strings and fragments do not
/// hide the extension. Matching is case-sensitive.
///
/// # Example
/// ```rust
/// use scraper_util::is_image_resource_url;
///
/// assert!(is_image_resource_url("https://x.com/img.png"));
/// assert!(!is_image_resource_url("https://x.com/img.png.txt"));
/// assert!(!is_image_resource_url("not a url"));
/// ```
pub fn is_image_resource_url(candidate: &str) -> bool {
    let Ok(url) = Url::parse(candidate) else {
        return false;
    };
    let path = url.path();
    SUPPORTED_IMAGE_EXTENSIONS.iter().any(|extension| path.ends_with(extension))
}
