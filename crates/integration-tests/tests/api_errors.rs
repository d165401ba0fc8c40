//! Error normalization over real HTTP.
//!
//! Every failure the backend or the network can produce must surface as
//! one `AppError` with a user-facing message.

#![allow(clippy::unwrap_used)]

use serde_json::Value;
use shopverse_core::{Product, ProductId};
use shopverse_integration_tests::{MockBackend, closed_port_url};
use shopverse_storefront::config::ApiConfig;
use shopverse_storefront::error::{FALLBACK_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE};
use shopverse_storefront::{ApiClient, AppError};

#[tokio::test]
async fn test_detail_message_is_surfaced() {
    let backend = MockBackend::start().await.unwrap();
    let api = backend.api().unwrap();

    let err = api
        .products()
        .get(&ProductId::new("65f1c0ffee00000000000fff"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Product not found");
}

#[tokio::test]
async fn test_status_fallback_messages() {
    let backend = MockBackend::start().await.unwrap();
    let api = backend.api().unwrap();

    for (status, expected) in [
        ("404", "Not found"),
        ("500", "Server error"),
        ("503", FALLBACK_ERROR_MESSAGE),
        ("400", FALLBACK_ERROR_MESSAGE),
    ] {
        let err = api.get::<Value>(&["fail", status]).await.unwrap_err();
        assert_eq!(err.to_string(), expected, "status {status}");
        assert_eq!(err.status().map(|s| s.to_string()).as_deref(), Some(status));
    }
}

#[tokio::test]
async fn test_validation_detail_list_is_joined() {
    let backend = MockBackend::start().await.unwrap();
    let api = backend.api().unwrap();

    let err = api.get::<Value>(&["fail-validation"]).await.unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.to_string(), "field required; field required");
}

#[tokio::test]
async fn test_undecodable_success_body_is_unexpected() {
    let backend = MockBackend::start().await.unwrap();
    let api = backend.api().unwrap();

    let err = api.get::<Vec<Product>>(&["garbled"]).await.unwrap_err();
    assert!(matches!(err, AppError::Unexpected(_)), "{err:?}");
    assert_eq!(err.to_string(), FALLBACK_ERROR_MESSAGE);
    assert!(err.is_reportable());
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let url = closed_port_url().await.unwrap();
    let api = ApiClient::new(&ApiConfig::new(&url).unwrap()).unwrap();

    let err = api.products().list().await.unwrap_err();
    assert!(matches!(err, AppError::Network), "{err:?}");
    assert_eq!(err.to_string(), NETWORK_ERROR_MESSAGE);
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_path_segments_are_encoded() {
    let backend = MockBackend::start().await.unwrap();
    let api = backend.api().unwrap();

    // Reaches the product route with the slash intact, so the backend's
    // own 404 detail comes back rather than a routing miss.
    let err = api
        .products()
        .get(&ProductId::new("a/b"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Product not found");
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let backend = MockBackend::start().await.unwrap();
    let api = ApiClient::new(&ApiConfig::new(&format!("{}/api/", backend.base_url())).unwrap())
        .unwrap();

    let url = api.endpoint(&["products", "p1"]).unwrap();
    assert_eq!(url.path(), "/api/products/p1");
}
