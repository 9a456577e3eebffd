use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub mod catalog;

pub use catalog::{EndpointCatalog, EndpointSpec};

/// An ordered set of `(key, value)` pairs substituted into an endpoint template.
///
/// `Parameters` is a shared handle: cloning it is cheap and the clone refers
/// to the same underlying instance. The store cache of an endpoint keys on that
/// instance identity (see [`Parameters::same_instance`]), so two handles built
/// separately from equal pairs compare equal with `==` but never share a cache
/// slot.
///
/// # Example
/// ```rust
/// use scraper_types::Parameters;
///
/// let params = Parameters::new([("id", "42")]);
/// let reused = params.clone();
/// let rebuilt = Parameters::new([("id", "42")]);
///
/// assert!(params.same_instance(&reused));
/// assert_eq!(params, rebuilt);
/// assert!(!params.same_instance(&rebuilt));
/// ```
#[derive(Clone)]
pub struct Parameters(Arc<[(String, String)]>);

impl Parameters {
    /// Build a new parameter instance from key/value pairs, preserving order.
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let pairs: Vec<(String, String)> = pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self(Arc::from(pairs))
    }

    /// A fresh instance with no pairs.
    pub fn empty() -> Self {
        Self::new(Vec::<(String, String)>::new())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Value of the first pair with the given key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` when both handles point at the same parameter instance.
    pub fn same_instance(&self, other: &Parameters) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Parameters {
    fn eq(&self, other: &Self) -> bool {
        self.pairs() == other.pairs()
    }
}

impl Eq for Parameters {}

impl fmt::Debug for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameters {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.as_ref().serialize(serializer)
    }
}

/// Parameters are written either as `[["key", "value"], ...]` or as a
/// `{ "key": "value" }` map.
#[derive(Deserialize)]
#[serde(untagged)]
enum PairCollection {
    Sequence(Vec<(String, String)>),
    Map(IndexMap<String, String>),
}

impl PairCollection {
    fn into_pairs(self) -> Vec<(String, String)> {
        match self {
            PairCollection::Sequence(pairs) => pairs,
            PairCollection::Map(map) => map.into_iter().collect(),
        }
    }
}

impl<'de> Deserialize<'de> for Parameters {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let collection = Option::<PairCollection>::deserialize(deserializer)?;
        Ok(collection.map(|c| Parameters::new(c.into_pairs())).unwrap_or_default())
    }
}

/// A queryable field of an endpoint: a display name and the path expression
/// selecting its value within the endpoint's document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointAttribute {
    pub name: String,
    pub path: String,
}

impl EndpointAttribute {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl<N: Into<String>, P: Into<String>> From<(N, P)> for EndpointAttribute {
    fn from((name, path): (N, P)) -> Self {
        Self::new(name, path)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AttributeRepr {
    Pair(String, String),
    Named { name: String, path: String },
}

impl<'de> Deserialize<'de> for EndpointAttribute {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match AttributeRepr::deserialize(deserializer)? {
            AttributeRepr::Pair(name, path) | AttributeRepr::Named { name, path } => EndpointAttribute { name, path },
        })
    }
}

/// Deserializes an attribute catalog written either as a sequence of
/// attributes or as an ordered `{ "name": "path" }` map.
pub fn deserialize_attributes<'de, D>(deserializer: D) -> Result<Vec<EndpointAttribute>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AttributeCollection {
        Sequence(Vec<EndpointAttribute>),
        Map(IndexMap<String, String>),
    }

    let maybe_collection = Option::<AttributeCollection>::deserialize(deserializer)?;
    Ok(match maybe_collection {
        Some(AttributeCollection::Sequence(attributes)) => attributes,
        Some(AttributeCollection::Map(map)) => map.into_iter().map(EndpointAttribute::from).collect(),
        None => Vec::new(),
    })
}

/// The final, sanitized value of a field.
#[derive(Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// The raw value rendered as text.
    Text(String),
    /// The bytes of an image the raw value pointed at.
    Image(Vec<u8>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Image(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FieldValue::Image(bytes) => Some(bytes),
            FieldValue::Text(_) => None,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, FieldValue::Image(_))
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.debug_tuple("Text").field(text).finish(),
            FieldValue::Image(bytes) => write!(f, "Image({} bytes)", bytes.len()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Image(bytes) => write!(f, "<image: {} bytes>", bytes.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_identity_but_rebuilt_sets_do_not() {
        let params = Parameters::new([("id", "42")]);
        let clone = params.clone();
        let rebuilt = Parameters::new([("id", "42")]);

        assert!(params.same_instance(&clone));
        assert!(!params.same_instance(&rebuilt));
        assert_eq!(params, rebuilt);
    }

    #[test]
    fn empty_parameter_sets_are_distinct_instances() {
        let first = Parameters::empty();
        let second = Parameters::default();

        assert!(first.is_empty());
        assert_eq!(first, second);
        assert!(!first.same_instance(&second));
    }

    #[test]
    fn parameters_deserialize_from_pairs_or_map() {
        let from_pairs: Parameters = serde_json::from_str(r#"[["id", "42"], ["lang", "en"]]"#).unwrap();
        let from_map: Parameters = serde_json::from_str(r#"{"id": "42", "lang": "en"}"#).unwrap();

        assert_eq!(from_pairs, from_map);
        assert_eq!(from_map.get("lang"), Some("en"));
        assert_eq!(from_map.pairs()[0], ("id".to_string(), "42".to_string()));
    }

    #[test]
    fn attributes_accept_tuple_and_struct_forms() {
        let attributes: Vec<EndpointAttribute> =
            serde_json::from_str(r#"[["Name", "$.name"], {"name": "Avatar", "path": "$.avatar"}]"#).unwrap();

        assert_eq!(attributes[0], EndpointAttribute::new("Name", "$.name"));
        assert_eq!(attributes[1], EndpointAttribute::new("Avatar", "$.avatar"));
    }

    #[test]
    fn field_value_display_summarizes_images() {
        assert_eq!(FieldValue::Text("hello".into()).to_string(), "hello");
        assert_eq!(FieldValue::Image(vec![0; 3]).to_string(), "<image: 3 bytes>");
        assert!(FieldValue::Image(Vec::new()).is_image());
    }
}
