//! # Scraper Engine
//!
//! The engine turns a catalog of named remote JSON resources into field
//! values. Each [`Endpoint`] runs a strict pipeline:
//!
//! - **URL building**: `%name` placeholders in the endpoint template are
//!   substituted from a [`Parameters`] set
//! - **Store cache**: the fetched document is kept in a single slot keyed by the
//!   identity of the parameter instance that requested it
//! - **Extraction**: an attribute's JSONPath expression selects one or more raw
//!   values from the cached document
//! - **Sanitization**: every raw value becomes text, or image bytes when it is
//!   an image URL; values that fail to resolve are dropped
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use scraper_api::HttpTransport;
//! use scraper_engine::{Endpoint, EndpointAttribute, Parameters};
//!
//! let transport = Arc::new(HttpTransport::new()?);
//! let endpoint = Endpoint::new(
//!     "Users",
//!     "/users/%id",
//!     Parameters::new([("id", "1")]),
//!     vec![EndpointAttribute::new("Name", "$.name")],
//!     None,
//!     transport,
//! )
//! .with_api_base("https://api.example.com");
//!
//! let params = Parameters::new([("id", "42")]);
//! let names = endpoint.query_field_by_attribute_name("Name", &params).await?;
//! ```
//!
//! ## Architecture
//!
//! - **`endpoint`**: the [`Endpoint`] descriptor and its public operations
//! - **`store`**: the single-slot document cache
//! - **`extract`**: JSONPath extraction and base-path selection
//! - **`sanitize`**: value classification and concurrent image resolution
//! - **`registry`**: one endpoint per catalog entry, sharing a transport
//! - **`config`**: loading and validating catalog files

pub mod config;
pub mod endpoint;
pub mod error;
pub mod extract;
pub mod registry;
pub mod sanitize;
pub mod store;

pub use endpoint::{Endpoint, VISITOR_ID_HEADER};
pub use error::EndpointError;
pub use extract::extract;
pub use registry::EndpointRegistry;
pub use sanitize::sanitize;
pub use scraper_types::{EndpointAttribute, EndpointCatalog, EndpointSpec, FieldValue, Parameters};

#[cfg(test)]
pub(crate) mod test_support;
