//! Exercises `HttpTransport` over real HTTP against a local axum server.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use scraper_api::{HttpTransport, Transport, TransportError};
use serde_json::{Value, json};

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

async fn document(headers: HeaderMap) -> axum::Json<Value> {
    let visitor = headers
        .get("visitor-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    axum::Json(json!({ "visitor": visitor, "items": [1, 2, 3] }))
}

async fn image() -> Vec<u8> {
    PNG_MAGIC.to_vec()
}

async fn broken() -> &'static str {
    "<html>not json</html>"
}

async fn missing() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn start_server() -> SocketAddr {
    let app = Router::new()
        .route("/document", get(document))
        .route("/image.png", get(image))
        .route("/broken", get(broken))
        .route("/missing", get(missing));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn get_json_sends_extra_headers_and_parses_body() {
    let addr = start_server().await;
    let transport = HttpTransport::new().unwrap();

    let body = transport
        .get_json(&format!("http://{addr}/document"), &[("Visitor-Id", "FIGMA-PLUGIN")])
        .await
        .unwrap();

    assert_eq!(body["visitor"], "FIGMA-PLUGIN");
    assert_eq!(body["items"], json!([1, 2, 3]));
}

#[tokio::test]
async fn get_bytes_returns_raw_body() {
    let addr = start_server().await;
    let transport = HttpTransport::new().unwrap();

    let bytes = transport.get_bytes(&format!("http://{addr}/image.png")).await.unwrap();
    assert_eq!(bytes, PNG_MAGIC.to_vec());
}

#[tokio::test]
async fn non_json_body_is_a_parse_failure() {
    let addr = start_server().await;
    let transport = HttpTransport::new().unwrap();

    let err = transport
        .get_json(&format!("http://{addr}/broken"), &[])
        .await
        .unwrap_err();
    assert!(err.is_parse_failure());
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let addr = start_server().await;
    let transport = HttpTransport::new().unwrap();

    let url = format!("http://{addr}/missing");
    let err = transport.get_bytes(&url).await.unwrap_err();
    assert!(matches!(err, TransportError::Status { status: 404, .. }));
    assert_eq!(err.url(), Some(url.as_str()));
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = HttpTransport::new().unwrap();
    let err = transport.get_bytes(&format!("http://{addr}/image.png")).await.unwrap_err();
    assert!(matches!(err, TransportError::Network { .. }));
}

#[tokio::test]
async fn https_requests_open_a_connection() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let transport = HttpTransport::new().unwrap();

    let request = tokio::spawn(async move { transport.get_bytes(&format!("https://{addr}/img.png")).await });

    let accepted = tokio::time::timeout(Duration::from_secs(5), listener.accept()).await;
    let (stream, _) = accepted.expect("https request never reached the listener").unwrap();
    drop(stream);

    let err = request.await.unwrap().unwrap_err();
    assert!(matches!(err, TransportError::Network { .. }));
}
