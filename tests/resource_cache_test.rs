//! ResourceCache over the real HTTP client, against a mock gallery server.

mod common;

use modbot::adapters::gallery::HttpGalleryClient;
use modbot::{FetchFailure, FetchOutcome, GalleryError, ResourceCache, ResourceLink};
use serde_json::json;
use tokio_util::sync::CancellationToken;

const GALLERY_PATH: &str = "/3/gallery/r/cats/page/";

fn gallery_body(groups: &[&[&str]]) -> String {
    let data: Vec<_> = groups
        .iter()
        .map(|links| {
            json!({
                "id": "album",
                "images": links.iter().map(|link| json!({ "link": link })).collect::<Vec<_>>(),
            })
        })
        .collect();
    json!({ "success": true, "status": 200, "data": data }).to_string()
}

fn cache_for(server: &mockito::Server) -> ResourceCache<HttpGalleryClient> {
    common::setup_test_logging();
    let config = common::gallery_config(&format!("{}{GALLERY_PATH}", server.url()));
    ResourceCache::from_config(&config).unwrap()
}

#[tokio::test]
async fn test_cold_fetch_then_cache_hit_uses_one_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", GALLERY_PATH)
        .match_header("authorization", "Client-ID test-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gallery_body(&[&["L1", "L2"], &["L3", "L4", "L5"]]))
        .expect(1)
        .create_async()
        .await;

    let mut cache = cache_for(&server);
    let cancel = CancellationToken::new();

    let first = cache.fetch(&cancel).await;
    assert!(matches!(first, FetchOutcome::Fetched(ref link) if link.as_str() == "L1"));
    assert_eq!(cache.pooled(), 4);

    let second = cache.fetch(&cancel).await;
    assert!(second.is_cache_hit());
    assert_eq!(second.into_link(), Some(ResourceLink::from("L2")));

    let remaining: Vec<&str> = cache.pool().map(ResourceLink::as_str).collect();
    assert_eq!(remaining, vec!["L3", "L4", "L5"]);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_application_failure_returns_nothing() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", GALLERY_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": false, "status": 403, "data": {"error": "rate limited"}}"#)
        .create_async()
        .await;

    let mut cache = cache_for(&server);
    let outcome = cache.fetch(&CancellationToken::new()).await;

    assert!(matches!(
        outcome.failure(),
        Some(FetchFailure::Application { status: Some(403) })
    ));
    assert_eq!(cache.pooled(), 0);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_error_is_a_transport_failure() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", GALLERY_PATH)
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let mut cache = cache_for(&server);
    let outcome = cache.fetch(&CancellationToken::new()).await;

    match outcome.failure() {
        Some(FetchFailure::Transport(GalleryError::Status { status, body })) => {
            assert_eq!(*status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("Expected transport status failure, got {other:?}"),
    }
    assert_eq!(cache.pooled(), 0);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_malformed_body_is_a_transport_failure() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", GALLERY_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let mut cache = cache_for(&server);
    let outcome = cache.fetch(&CancellationToken::new()).await;

    assert!(matches!(
        outcome.failure(),
        Some(FetchFailure::Transport(GalleryError::Decode(_)))
    ));
}

#[tokio::test]
async fn test_single_link_page_is_not_pooled() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", GALLERY_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gallery_body(&[&["only"]]))
        .create_async()
        .await;

    let mut cache = cache_for(&server);
    let outcome = cache.fetch(&CancellationToken::new()).await;

    assert_eq!(outcome.into_link(), Some(ResourceLink::from("only")));
    assert_eq!(cache.pooled(), 0);
}

#[tokio::test]
async fn test_empty_success_payload_is_guarded() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", GALLERY_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "status": 200, "data": [{"title": "no album"}]}"#)
        .create_async()
        .await;

    let mut cache = cache_for(&server);
    let outcome = cache.fetch(&CancellationToken::new()).await;

    assert!(matches!(outcome.failure(), Some(FetchFailure::EmptyPayload)));
}

#[tokio::test]
async fn test_cancelled_before_request_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", GALLERY_PATH)
        .with_status(200)
        .with_body(gallery_body(&[&["L1"]]))
        .expect(0)
        .create_async()
        .await;

    let mut cache = cache_for(&server);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let outcome = cache.fetch(&cancel).await;

    assert!(matches!(outcome.failure(), Some(FetchFailure::Cancelled)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_connection_refused_is_a_transport_failure() {
    common::setup_test_logging();
    // Port 1 is reserved and nothing listens on it
    let config = common::gallery_config("http://127.0.0.1:1/gallery");
    let mut cache = ResourceCache::from_config(&config).unwrap();

    let outcome = cache.fetch(&CancellationToken::new()).await;

    assert!(matches!(
        outcome.failure(),
        Some(FetchFailure::Transport(GalleryError::Network(_)))
    ));
    assert!(outcome.link().is_none());
    assert_eq!(cache.pooled(), 0);
}

#[test]
fn test_zero_timeout_is_rejected_up_front() {
    let mut config = common::gallery_config("http://127.0.0.1:1/gallery");
    config.timeout_secs = 0;

    assert!(matches!(
        ResourceCache::from_config(&config),
        Err(GalleryError::ZeroTimeout)
    ));
}

#[test]
fn test_missing_client_id_is_rejected_up_front() {
    let config = modbot::GalleryConfig::new("http://127.0.0.1:1/gallery", "");

    assert!(matches!(
        ResourceCache::from_config(&config),
        Err(GalleryError::MissingClientId)
    ));
}
