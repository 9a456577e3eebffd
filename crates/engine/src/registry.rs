//! Endpoint registry built from a catalog.

use std::sync::Arc;

use indexmap::IndexMap;
use scraper_api::Transport;
use scraper_types::EndpointCatalog;
use tracing::debug;

use crate::{Endpoint, EndpointError};

/// One [`Endpoint`] per catalog entry, all sharing a single transport.
///
/// Each endpoint keeps its own store cache; the registry adds no caching of
/// its own.
#[derive(Debug, Default)]
pub struct EndpointRegistry {
    endpoints: IndexMap<String, Endpoint>,
}

impl EndpointRegistry {
    pub fn from_catalog(catalog: &EndpointCatalog, transport: Arc<dyn Transport>) -> Self {
        let endpoints = catalog
            .endpoints
            .iter()
            .map(|(name, spec)| {
                debug!(endpoint = %name, template = %spec.endpoint, "registering endpoint");
                (name.clone(), Endpoint::from_spec(spec, Arc::clone(&transport)))
            })
            .collect();
        Self { endpoints }
    }

    /// Looks up an endpoint by its catalog name.
    pub fn get(&self, name: &str) -> Result<&Endpoint, EndpointError> {
        self.endpoints.get(name).ok_or_else(|| EndpointError::EndpointNotFound {
            name: name.to_string(),
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.endpoints.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Endpoint)> {
        self.endpoints.iter().map(|(name, endpoint)| (name.as_str(), endpoint))
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
