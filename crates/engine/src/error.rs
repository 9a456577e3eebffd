//! Error types for the endpoint pipeline.

use scraper_api::TransportError;
use thiserror::Error;

/// Failures surfaced by [`Endpoint`](crate::Endpoint) operations.
///
/// Per-value failures during sanitization never appear here; those values are
/// dropped from the output instead.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The document fetch failed in transport, returned a non-success status,
    /// or did not contain JSON.
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Invalid Path: {path} ({reason})")]
    InvalidPath { path: String, reason: String },

    #[error("Base path {base_path} selects nothing in the response from {url}")]
    BasePathNotFound { base_path: String, url: String },

    #[error("Couldn't find attribute with name: {name}")]
    AttributeNotFound { name: String },

    #[error("Couldn't find endpoint with name: {name}")]
    EndpointNotFound { name: String },

    /// Collecting the settled per-value tasks failed as a whole.
    #[error("Sanitization aborted: {reason}")]
    Aggregate { reason: String },
}

impl EndpointError {
    /// Whether the failure is a lookup miss (attribute or endpoint name).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EndpointError::AttributeNotFound { .. } | EndpointError::EndpointNotFound { .. }
        )
    }
}
