//! Pure helpers shared by the endpoint engine and the CLI.
//!
//! Nothing in this crate touches the network; every function is a
//! deterministic transformation of its inputs.

pub mod path_processing;
pub mod resource_classification;
pub mod text_processing;
pub mod url_template;

pub use path_processing::expand_tilde;
pub use resource_classification::{SUPPORTED_IMAGE_EXTENSIONS, is_image_resource_url};
pub use text_processing::stringify_value;
pub use url_template::{resolve_endpoint_url, template_placeholders};
