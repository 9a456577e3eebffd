//! Value sanitization: classify raw values and resolve image references.
//!
//! Each raw value is rendered as text. When that text is an image URL (see
//! [`is_image_resource_url`]) the image is fetched and its bytes replace the
//! text. Every value is resolved on its own task; the aggregate waits for all
//! of them and keeps the successes in input order.

use std::sync::Arc;

use futures_util::future::join_all;
use scraper_api::{Transport, TransportError};
use scraper_types::FieldValue;
use scraper_util::{is_image_resource_url, stringify_value};
use serde_json::Value;
use tracing::{debug, warn};

use crate::EndpointError;

/// Resolves `values` concurrently, dropping the ones that fail.
///
/// The output never contains more elements than the input and may contain
/// fewer. Individual failures are logged at `warn` and never surface as an
/// error. The call fails as a whole only with [`EndpointError::Aggregate`],
/// when a task is cancelled before it settles.
pub async fn sanitize(transport: Arc<dyn Transport>, values: Vec<Value>) -> Result<Vec<FieldValue>, EndpointError> {
    let total = values.len();
    let handles: Vec<_> = values
        .into_iter()
        .map(|raw| {
            let transport = Arc::clone(&transport);
            tokio::spawn(async move { resolve_value(transport.as_ref(), &raw).await })
        })
        .collect();

    let mut available = Vec::with_capacity(total);
    for (index, settled) in join_all(handles).await.into_iter().enumerate() {
        match settled {
            Ok(Ok(value)) => available.push(value),
            Ok(Err(error)) => warn!(index, %error, "dropping value that failed to resolve"),
            Err(join_error) if join_error.is_panic() => warn!(index, "dropping value whose task panicked"),
            Err(join_error) => {
                return Err(EndpointError::Aggregate {
                    reason: join_error.to_string(),
                });
            }
        }
    }

    let dropped = total - available.len();
    if dropped > 0 {
        warn!(dropped, total, "some field values were dropped");
    }
    Ok(available)
}

/// Classifies one raw value and fetches its bytes when it is an image URL.
pub async fn resolve_value(transport: &dyn Transport, raw: &Value) -> Result<FieldValue, TransportError> {
    let value = stringify_value(raw);
    if is_image_resource_url(&value) {
        debug!(url = %value, "fetching image resource");
        let bytes = transport.get_bytes(&value).await?;
        return Ok(FieldValue::Image(bytes));
    }
    Ok(FieldValue::Text(value))
}
