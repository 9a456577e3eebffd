//! Catalog IO helpers.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use dirs_next::config_dir;
use scraper_types::EndpointCatalog;
use scraper_util::expand_tilde;
use tracing::debug;

use crate::config::validate_catalog;

/// Overrides the catalog location.
pub const CONFIG_PATH_ENV: &str = "SCRAPER_CONFIG_PATH";
/// Overrides `apiBase` of every endpoint in the loaded catalog.
pub const API_BASE_ENV: &str = "SCRAPER_API_BASE";

/// Serialization format of a catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    /// `.yaml` and `.yml` files are YAML; everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => CatalogFormat::Yaml,
            _ => CatalogFormat::Json,
        }
    }
}

/// Returns the default path for the catalog file.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_PATH_ENV)
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("endpoint-scraper")
        .join("endpoints.json")
}

/// Loads the catalog from the default path.
pub fn load_catalog() -> anyhow::Result<EndpointCatalog> {
    let path = default_config_path();
    load_catalog_from_path(&path)
}

/// Loads, overrides and validates the catalog at `path`.
///
/// A missing file yields an empty catalog.
pub fn load_catalog_from_path(path: &Path) -> anyhow::Result<EndpointCatalog> {
    if !path.exists() {
        debug!(path = %path.display(), "catalog file not found; using empty catalog");
        return Ok(EndpointCatalog::default());
    }

    let content = fs::read_to_string(path).with_context(|| format!("read catalog {}", path.display()))?;
    let mut catalog =
        parse_catalog(&content, CatalogFormat::from_path(path)).with_context(|| format!("parse catalog {}", path.display()))?;
    apply_env_overrides(&mut catalog);
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Parses catalog text without overrides or validation.
pub fn parse_catalog(content: &str, format: CatalogFormat) -> anyhow::Result<EndpointCatalog> {
    let catalog = match format {
        CatalogFormat::Json => serde_json::from_str(content)?,
        CatalogFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(catalog)
}

fn apply_env_overrides(catalog: &mut EndpointCatalog) {
    let Ok(api_base) = env::var(API_BASE_ENV) else {
        return;
    };
    let api_base = api_base.trim();
    if api_base.is_empty() {
        return;
    }
    debug!(%api_base, "overriding apiBase from environment");
    for spec in catalog.endpoints.values_mut() {
        spec.api_base = Some(api_base.to_string());
    }
}
