//! Endpoint catalog configuration.
//! This module handles locating, parsing, overriding and validating the
//! catalog file (JSON or YAML) that declares the available endpoints.

mod io;
mod validation;

pub use io::{
    API_BASE_ENV, CONFIG_PATH_ENV, CatalogFormat, default_config_path, load_catalog, load_catalog_from_path, parse_catalog,
};
pub use validation::{ValidationError, validate_catalog, validate_endpoint, validate_endpoint_name};
