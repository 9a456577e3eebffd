//! Catalog validation.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper_api::validate_base_url;
use scraper_types::{EndpointCatalog, EndpointSpec};
use scraper_util::template_placeholders;
use thiserror::Error;
use tracing::debug;

/// Errors found while validating a catalog.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid endpoint name '{name}': {reason}")]
    InvalidEndpointName { name: String, reason: String },

    #[error("Endpoint '{endpoint}' is missing required field '{field}'")]
    MissingRequiredField { endpoint: String, field: String },

    #[error("Endpoint '{endpoint}' declares attribute '{attribute}' more than once")]
    DuplicateAttribute { endpoint: String, attribute: String },

    #[error("Endpoint '{endpoint}' attribute '{attribute}' has an empty path")]
    EmptyAttributePath { endpoint: String, attribute: String },

    #[error("Endpoint '{endpoint}' has an invalid apiBase: {reason}")]
    InvalidApiBase { endpoint: String, reason: String },
}

static ENDPOINT_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9._-]+$").expect("endpoint name regex should compile"));

/// Validate the entire catalog.
pub fn validate_catalog(catalog: &EndpointCatalog) -> Result<(), ValidationError> {
    for (name, spec) in &catalog.endpoints {
        validate_endpoint_name(name)?;
        validate_endpoint(name, spec)?;
        debug!("Validated endpoint configuration: {}", name);
    }
    Ok(())
}

/// Validate an endpoint name.
pub fn validate_endpoint_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::InvalidEndpointName {
            name: name.to_string(),
            reason: "Endpoint name cannot be empty".to_string(),
        });
    }

    if !ENDPOINT_NAME_REGEX.is_match(name) {
        return Err(ValidationError::InvalidEndpointName {
            name: name.to_string(),
            reason: "Endpoint name must contain only lowercase letters, numbers, dots, underscores, and hyphens".to_string(),
        });
    }

    Ok(())
}

/// Validate a single endpoint.
pub fn validate_endpoint(name: &str, spec: &EndpointSpec) -> Result<(), ValidationError> {
    if spec.title.trim().is_empty() {
        return Err(ValidationError::MissingRequiredField {
            endpoint: name.to_string(),
            field: "title".to_string(),
        });
    }
    if spec.endpoint.trim().is_empty() {
        return Err(ValidationError::MissingRequiredField {
            endpoint: name.to_string(),
            field: "endpoint".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for attribute in &spec.attributes {
        if !seen.insert(attribute.name.as_str()) {
            return Err(ValidationError::DuplicateAttribute {
                endpoint: name.to_string(),
                attribute: attribute.name.clone(),
            });
        }
        if attribute.path.trim().is_empty() {
            return Err(ValidationError::EmptyAttributePath {
                endpoint: name.to_string(),
                attribute: attribute.name.clone(),
            });
        }
    }

    if let Some(api_base) = &spec.api_base {
        validate_base_url(api_base).map_err(|e| ValidationError::InvalidApiBase {
            endpoint: name.to_string(),
            reason: e.to_string(),
        })?;
    }

    let uncovered: Vec<String> = template_placeholders(&spec.endpoint)
        .into_iter()
        .filter(|placeholder| spec.default_parameters.get(placeholder).is_none())
        .collect();
    if !uncovered.is_empty() {
        debug!(endpoint = name, ?uncovered, "placeholders without a default parameter");
    }

    Ok(())
}
