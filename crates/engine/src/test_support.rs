//! In-memory transport used by the engine's unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use scraper_api::{Transport, TransportError};
use serde_json::Value;

/// Serves canned documents and images and records every request.
#[derive(Default)]
pub(crate) struct RecordingTransport {
    documents: Mutex<HashMap<String, Value>>,
    invalid_json: Mutex<HashSet<String>>,
    images: Mutex<HashMap<String, Vec<u8>>>,
    panics: Mutex<HashSet<String>>,
    json_requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
    byte_requests: Mutex<Vec<String>>,
    latency: Mutex<Option<Duration>>,
}

impl RecordingTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn with_document(self: Arc<Self>, url: &str, document: Value) -> Arc<Self> {
        self.set_document(url, document);
        self
    }

    pub(crate) fn with_invalid_json(self: Arc<Self>, url: &str) -> Arc<Self> {
        self.invalid_json.lock().unwrap().insert(url.to_string());
        self
    }

    pub(crate) fn with_bytes(self: Arc<Self>, url: &str, bytes: Vec<u8>) -> Arc<Self> {
        self.images.lock().unwrap().insert(url.to_string(), bytes);
        self
    }

    pub(crate) fn panicking_on(self: Arc<Self>, url: &str) -> Arc<Self> {
        self.panics.lock().unwrap().insert(url.to_string());
        self
    }

    /// Every request sleeps for `latency` after being recorded.
    pub(crate) fn with_latency(self: Arc<Self>, latency: Duration) -> Arc<Self> {
        *self.latency.lock().unwrap() = Some(latency);
        self
    }

    pub(crate) fn set_document(&self, url: &str, document: Value) {
        self.documents.lock().unwrap().insert(url.to_string(), document);
    }

    pub(crate) fn json_calls(&self) -> usize {
        self.json_requests.lock().unwrap().len()
    }

    pub(crate) fn byte_calls(&self) -> usize {
        self.byte_requests.lock().unwrap().len()
    }

    pub(crate) fn json_urls(&self) -> Vec<String> {
        self.json_requests.lock().unwrap().iter().map(|(url, _)| url.clone()).collect()
    }

    pub(crate) fn last_json_headers(&self) -> Vec<(String, String)> {
        self.json_requests
            .lock()
            .unwrap()
            .last()
            .map(|(_, headers)| headers.clone())
            .unwrap_or_default()
    }

    async fn delay(&self) {
        let latency = *self.latency.lock().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn get_json(&self, url: &str, headers: &[(&str, &str)]) -> Result<Value, TransportError> {
        let recorded = headers.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        self.json_requests.lock().unwrap().push((url.to_string(), recorded));
        self.delay().await;

        if self.invalid_json.lock().unwrap().contains(url) {
            let source = serde_json::from_str::<Value>("<html>").unwrap_err();
            return Err(TransportError::Json {
                url: url.to_string(),
                source,
            });
        }
        let document = self.documents.lock().unwrap().get(url).cloned();
        document.ok_or_else(|| TransportError::Status {
            url: url.to_string(),
            status: 404,
        })
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.byte_requests.lock().unwrap().push(url.to_string());
        self.delay().await;

        let should_panic = self.panics.lock().unwrap().contains(url);
        if should_panic {
            panic!("transport exploded for {url}");
        }
        let bytes = self.images.lock().unwrap().get(url).cloned();
        bytes.ok_or_else(|| TransportError::Network {
            url: url.to_string(),
            message: "connection refused".to_string(),
        })
    }
}
