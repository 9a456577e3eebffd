//! Serializable description of endpoints, as read from a catalog file.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{EndpointAttribute, Parameters, deserialize_attributes};

/// All configured endpoints keyed by a short, stable name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EndpointCatalog {
    #[serde(default)]
    pub endpoints: IndexMap<String, EndpointSpec>,
}

impl EndpointCatalog {
    pub fn get(&self, name: &str) -> Option<&EndpointSpec> {
        self.endpoints.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

/// Configuration for a single endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EndpointSpec {
    /// Display name.
    pub title: String,

    /// URL template with `%name` placeholders.
    pub endpoint: String,

    /// Fallback parameters a host may pass explicitly; never applied automatically.
    #[serde(default)]
    pub default_parameters: Parameters,

    /// Catalog of queryable fields, in declaration order.
    #[serde(default, deserialize_with = "deserialize_attributes")]
    pub attributes: Vec<EndpointAttribute>,

    /// Selects the sub-document used as the root for attribute paths.
    #[serde(default)]
    pub base_path: Option<String>,

    /// Prefix prepended to `endpoint` before substitution.
    #[serde(default)]
    pub api_base: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_catalog_with_mixed_attribute_forms() {
        let raw = r#"{
            "endpoints": {
                "users": {
                    "title": "Users",
                    "endpoint": "/users/%id",
                    "defaultParameters": [["id", "1"]],
                    "attributes": {"Name": "$.name", "Avatar": "$.avatar_url"},
                    "basePath": "data"
                },
                "posts": {
                    "title": "Posts",
                    "endpoint": "https://example.com/posts",
                    "attributes": [["Title", "$[*].title"]]
                }
            }
        }"#;

        let catalog: EndpointCatalog = serde_json::from_str(raw).unwrap();
        let users = catalog.get("users").unwrap();
        assert_eq!(users.attributes.len(), 2);
        assert_eq!(users.attributes[1].name, "Avatar");
        assert_eq!(users.default_parameters.get("id"), Some("1"));
        assert_eq!(users.base_path.as_deref(), Some("data"));

        let posts = catalog.get("posts").unwrap();
        assert!(posts.default_parameters.is_empty());
        assert!(posts.api_base.is_none());
        assert_eq!(catalog.endpoints.keys().collect::<Vec<_>>(), vec!["users", "posts"]);
    }

    #[test]
    fn parses_yaml_catalog() {
        let raw = r#"
endpoints:
  cats:
    title: Cats
    endpoint: "/v1/images/search?limit=%limit"
    apiBase: "https://api.thecatapi.com"
    defaultParameters:
      limit: "3"
    attributes:
      - name: Picture
        path: "$[*].url"
"#;

        let catalog: EndpointCatalog = serde_yaml::from_str(raw).unwrap();
        let cats = catalog.get("cats").unwrap();
        assert_eq!(cats.api_base.as_deref(), Some("https://api.thecatapi.com"));
        assert_eq!(cats.attributes[0], EndpointAttribute::new("Picture", "$[*].url"));
    }

    #[test]
    fn rejects_unknown_fields() {
        let raw = r#"{"endpoints": {"x": {"title": "X", "endpoint": "/x", "colour": "red"}}}"#;
        assert!(serde_json::from_str::<EndpointCatalog>(raw).is_err());
    }
}
