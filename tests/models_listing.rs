//! List-models tests covering cache freshness, stale fallback, and
//! filtering against a mocked catalog endpoint.

use glimpse::cache::{CatalogCache, CACHE_TTL};
use glimpse::catalog;
use glimpse::{GlimpseError, OpenRouterClient};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn catalog_body() -> serde_json::Value {
    serde_json::json!({
        "data": [
            {"id": "text/only", "architecture": {"input_modalities": ["text"]}},
            {
                "id": "vision/alpha",
                "name": "Vision Alpha",
                "context_length": 128000,
                "pricing": {"prompt": "0.000001", "completion": "0.000002"},
                "architecture": {"input_modalities": ["text", "image"]},
                "description": "A vision model."
            },
            {"id": "vision/beta", "architecture": {"input_modalities": ["image"]}}
        ]
    })
}

fn temp_cache(dir: &TempDir) -> CatalogCache {
    CatalogCache::new(dir.path().join("models.json"))
}

fn backdate(cache: &CatalogCache, by: Duration) {
    let file = std::fs::File::options()
        .append(true)
        .open(cache.path())
        .unwrap();
    file.set_modified(SystemTime::now() - by).unwrap();
}

#[tokio::test]
async fn fetch_filters_and_populates_cache() {
    let dir = TempDir::new().unwrap();
    let cache = temp_cache(&dir);
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenRouterClient::with_base_url(server.uri());
    let models = catalog::image_capable_models(&client, &cache).await.unwrap();

    let ids: Vec<&str> = models.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["vision/alpha", "vision/beta"]);
    assert!(cache.path().exists(), "fetch should persist the raw body");
}

#[tokio::test]
async fn fresh_cache_skips_network_entirely() {
    let dir = TempDir::new().unwrap();
    let cache = temp_cache(&dir);
    cache.store(&catalog_body().to_string());

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_body()))
        .expect(0)
        .mount(&server)
        .await;

    let client = OpenRouterClient::with_base_url(server.uri());
    let models = catalog::image_capable_models(&client, &cache).await.unwrap();
    assert_eq!(models.len(), 2);
}

#[tokio::test]
async fn stale_cache_triggers_refetch() {
    let dir = TempDir::new().unwrap();
    let cache = temp_cache(&dir);
    cache.store(r#"{"data": []}"#);
    backdate(&cache, CACHE_TTL + Duration::from_secs(60));

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenRouterClient::with_base_url(server.uri());
    let models = catalog::image_capable_models(&client, &cache).await.unwrap();
    assert_eq!(models.len(), 2, "stale cache must be refreshed from network");
}

#[tokio::test]
async fn network_failure_falls_back_to_stale_cache() {
    let dir = TempDir::new().unwrap();
    let cache = temp_cache(&dir);
    cache.store(&catalog_body().to_string());
    backdate(&cache, CACHE_TTL + Duration::from_secs(3600));

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = OpenRouterClient::with_base_url(server.uri());
    let models = catalog::image_capable_models(&client, &cache).await.unwrap();
    assert_eq!(models.len(), 2, "any-age cache must mask the network failure");
}

#[tokio::test]
async fn network_failure_with_no_cache_propagates() {
    let dir = TempDir::new().unwrap();
    let cache = temp_cache(&dir);

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = OpenRouterClient::with_base_url(server.uri());
    let err = catalog::image_capable_models(&client, &cache)
        .await
        .unwrap_err();
    assert!(matches!(err, GlimpseError::Network(_)));
}

#[tokio::test]
async fn corrupt_fresh_cache_falls_through_to_network() {
    let dir = TempDir::new().unwrap();
    let cache = temp_cache(&dir);
    cache.store("{torn write");

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenRouterClient::with_base_url(server.uri());
    let models = catalog::image_capable_models(&client, &cache).await.unwrap();
    assert_eq!(models.len(), 2);
}

#[tokio::test]
async fn empty_catalog_yields_no_entries() {
    let dir = TempDir::new().unwrap();
    let cache = temp_cache(&dir);

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .mount(&server)
        .await;

    let client = OpenRouterClient::with_base_url(server.uri());
    let models = catalog::image_capable_models(&client, &cache).await.unwrap();
    assert!(models.is_empty());
}
