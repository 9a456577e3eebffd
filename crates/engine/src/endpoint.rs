//! The endpoint descriptor and its query pipeline.

use std::fmt;
use std::sync::Arc;

use scraper_api::Transport;
use scraper_types::{EndpointAttribute, EndpointSpec, FieldValue, Parameters};
use scraper_util::resolve_endpoint_url;
use serde_json::Value;
use tracing::debug;

use crate::extract::{extract, select_base};
use crate::sanitize::sanitize;
use crate::store::StoreCache;
use crate::EndpointError;

/// Static header sent with every document fetch.
pub const VISITOR_ID_HEADER: (&str, &str) = ("Visitor-Id", "FIGMA-PLUGIN");

/// A named, parameterized remote JSON resource plus its catalog of fields.
///
/// The descriptor is immutable once built. Its only mutable state is the
/// store cache, which keeps the last fetched document together with the
/// parameter instance that requested it.
///
/// # Fields
/// - `title`: display name
/// - `endpoint`: URL template with `%name` placeholders
/// - `default_parameters`: fallback parameters; never applied implicitly
/// - `attributes`: ordered `(name, path)` catalog
/// - `base_path`: selects the sub-document that attribute paths run against
/// - `api_base`: prefix joined in front of `endpoint`
pub struct Endpoint {
    title: String,
    endpoint: String,
    default_parameters: Parameters,
    attributes: Vec<EndpointAttribute>,
    base_path: Option<String>,
    api_base: Option<String>,
    store_cache: StoreCache,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("title", &self.title)
            .field("endpoint", &self.endpoint)
            .field("default_parameters", &self.default_parameters)
            .field("attributes", &self.attributes)
            .field("base_path", &self.base_path)
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl Endpoint {
    pub fn new(
        title: impl Into<String>,
        endpoint: impl Into<String>,
        default_parameters: Parameters,
        attributes: Vec<EndpointAttribute>,
        base_path: Option<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            title: title.into(),
            endpoint: endpoint.into(),
            default_parameters,
            attributes,
            base_path,
            api_base: None,
            store_cache: StoreCache::new(),
            transport,
        }
    }

    /// Build an endpoint from its catalog entry.
    pub fn from_spec(spec: &EndpointSpec, transport: Arc<dyn Transport>) -> Self {
        let endpoint = Self::new(
            spec.title.clone(),
            spec.endpoint.clone(),
            spec.default_parameters.clone(),
            spec.attributes.clone(),
            spec.base_path.clone(),
            transport,
        );
        match &spec.api_base {
            Some(api_base) => endpoint.with_api_base(api_base.clone()),
            None => endpoint,
        }
    }

    /// Sets the prefix joined in front of the endpoint template.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The stored default parameter instance. Passing this same handle on
    /// every call lets the store cache hit.
    pub fn default_parameters(&self) -> &Parameters {
        &self.default_parameters
    }

    pub fn attributes(&self) -> &[EndpointAttribute] {
        &self.attributes
    }

    pub fn base_path(&self) -> Option<&str> {
        self.base_path.as_deref()
    }

    pub fn api_base(&self) -> Option<&str> {
        self.api_base.as_deref()
    }

    /// First attribute whose name matches exactly.
    pub fn attribute(&self, name: &str) -> Option<&EndpointAttribute> {
        self.attributes.iter().find(|attribute| attribute.name == name)
    }

    /// The request URL for `parameters`.
    pub fn resolved_url(&self, parameters: &Parameters) -> String {
        resolve_endpoint_url(&self.endpoint, self.api_base.as_deref(), parameters)
    }

    /// Returns the document backing this endpoint for `parameters`.
    ///
    /// The cached document is reused only when `parameters` is the very
    /// instance the cache was filled with; otherwise the document is fetched
    /// again. Concurrent misses are not coalesced.
    pub async fn store(&self, parameters: &Parameters) -> Result<Arc<Value>, EndpointError> {
        if let Some(data) = self.store_cache.lookup(parameters).await {
            debug!(endpoint = %self.title, "store cache hit");
            return Ok(data);
        }
        debug!(endpoint = %self.title, "store cache miss");
        self.query_store(parameters).await
    }

    /// Fetches the document and replaces the cache slot. The slot is left
    /// untouched when the fetch or base-path selection fails.
    async fn query_store(&self, parameters: &Parameters) -> Result<Arc<Value>, EndpointError> {
        let url = self.resolved_url(parameters);
        let body = self.transport.get_json(&url, &[VISITOR_ID_HEADER]).await?;

        let document = match &self.base_path {
            Some(base_path) => select_base(body, base_path).ok_or_else(|| EndpointError::BasePathNotFound {
                base_path: base_path.clone(),
                url: url.clone(),
            })?,
            None => body,
        };

        let document = Arc::new(document);
        self.store_cache.replace(parameters, Arc::clone(&document)).await;
        Ok(document)
    }

    /// Runs the full pipeline for one attribute: store, extract, sanitize.
    pub async fn query_field(
        &self,
        attribute: &EndpointAttribute,
        parameters: &Parameters,
    ) -> Result<Vec<FieldValue>, EndpointError> {
        let store = self.store(parameters).await?;
        let raw_values = extract(&store, &attribute.path)?;
        sanitize(Arc::clone(&self.transport), raw_values).await
    }

    /// Resolves `name` in the attribute catalog and queries that field.
    ///
    /// Fails with [`EndpointError::AttributeNotFound`] without touching the
    /// network when no attribute has that name.
    pub async fn query_field_by_attribute_name(
        &self,
        name: &str,
        parameters: &Parameters,
    ) -> Result<Vec<FieldValue>, EndpointError> {
        debug!(endpoint = %self.title, attribute = name, "querying field by name");
        let attribute = self.attribute(name).ok_or_else(|| EndpointError::AttributeNotFound {
            name: name.to_string(),
        })?;
        self.query_field(attribute, parameters).await
    }
}
