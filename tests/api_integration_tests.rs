//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint against a
//! temporary on-disk cache and a fake review provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use parental_guide::api::create_router;
use parental_guide::cache::ReviewCache;
use parental_guide::error::Result;
use parental_guide::models::{ReviewItem, ReviewRecord, ReviewStatus};
use parental_guide::providers::{Provider, ProviderRegistry};
use parental_guide::AppState;

// == Helper Functions ==

struct FakeKidsInMind {
    with_items: bool,
}

#[async_trait]
impl Provider for FakeKidsInMind {
    fn name(&self) -> &str {
        "kidsinmind"
    }

    async fn fetch(&self, external_id: Option<&str>, title: &str) -> Result<ReviewRecord> {
        let review_items = self.with_items.then(|| {
            vec![ReviewItem {
                name: "Violence".to_string(),
                score: Some(2.5),
                description: Some("Prison violence throughout.".to_string()),
                cat: Some("Mild".to_string()),
                votes: None,
            }]
        });
        Ok(ReviewRecord {
            id: external_id.map(str::to_string),
            status: ReviewStatus::Success,
            title: title.to_string(),
            provider: "KidsInMind".to_string(),
            recommended_age: None,
            review_items,
            review_link: Some("https://kids-in-mind.com/s/example.htm".to_string()),
        })
    }
}

fn create_test_app(dir: &TempDir, with_items: bool) -> Router {
    let cache =
        ReviewCache::open(&dir.path().join("cache.sqlite"), Duration::from_secs(60)).unwrap();
    let mut providers = ProviderRegistry::new();
    providers.register(Arc::new(FakeKidsInMind { with_items }));
    create_router(AppState::new(cache, providers))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// == Health / Stats Endpoints ==

#[tokio::test]
async fn test_health_endpoint() {
    let dir = TempDir::new().unwrap();
    let (status, json) = get(create_test_app(&dir, true), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

#[tokio::test]
async fn test_stats_endpoint_starts_empty() {
    let dir = TempDir::new().unwrap();
    let (status, json) = get(create_test_app(&dir, true), "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cached_records"], 0);
}

// == Lookup Validation ==

#[tokio::test]
async fn test_get_data_requires_provider() {
    let dir = TempDir::new().unwrap();
    let (status, json) = get(create_test_app(&dir, true), "/get_data?imdb_id=tt0111161").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("Provider"));
}

#[tokio::test]
async fn test_get_data_unknown_provider() {
    let dir = TempDir::new().unwrap();
    let (status, json) = get(
        create_test_app(&dir, true),
        "/get_data?imdb_id=tt0111161&provider=dove",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("Unknown provider"));
}

#[tokio::test]
async fn test_get_data_requires_id_or_title() {
    let dir = TempDir::new().unwrap();
    let (status, _) = get(create_test_app(&dir, true), "/get_data?provider=kidsinmind").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// == Lookup Flow ==

#[tokio::test]
async fn test_fresh_lookup_then_cache_hit() {
    let dir = TempDir::new().unwrap();
    let app = create_test_app(&dir, true);
    let uri = "/get_data?imdb_id=tt0111161&video_name=The+Shawshank+Redemption&provider=kidsinmind";

    let (status, first) = get(app.clone(), uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["is_cached"], false);
    assert_eq!(first["title"], "The Shawshank Redemption");
    assert_eq!(first["review-items"][0]["cat"], "Mild");

    let (status, second) = get(app.clone(), uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["is_cached"], true);
    assert_eq!(second["review-items"][0]["cat"], "Mild");

    let (_, stats) = get(app, "/stats").await;
    assert_eq!(stats["cached_records"], 1);
}

#[tokio::test]
async fn test_title_only_lookup_uses_normalized_key() {
    let dir = TempDir::new().unwrap();
    let app = create_test_app(&dir, true);

    let (status, first) = get(
        app.clone(),
        "/get_data?video_name=Spider-Man%3A+Far+From+Home&provider=kidsinmind",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["is_cached"], false);

    // Different case and spacing, same normalized key
    let (status, second) = get(
        app,
        "/get_data?video_name=spider-man+far+from+home&provider=KIDSINMIND",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["is_cached"], true);
}

#[tokio::test]
async fn test_record_without_reviews_is_served_but_not_cached() {
    let dir = TempDir::new().unwrap();
    let app = create_test_app(&dir, false);
    let uri = "/get_data?imdb_id=tt0000001&video_name=Obscure+Short&provider=kidsinmind";

    let (status, first) = get(app.clone(), uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["is_cached"], false);
    assert!(first["review-items"].is_null());

    // Nothing was persisted, so the next call is fresh again
    let (_, second) = get(app.clone(), uri).await;
    assert_eq!(second["is_cached"], false);

    let (_, stats) = get(app, "/stats").await;
    assert_eq!(stats["cached_records"], 0);
}

#[tokio::test]
async fn test_cache_survives_router_rebuild() {
    let dir = TempDir::new().unwrap();
    let uri = "/get_data?imdb_id=tt0111161&provider=kidsinmind&video_name=Shawshank";

    let (_, first) = get(create_test_app(&dir, true), uri).await;
    assert_eq!(first["is_cached"], false);

    // A second app instance over the same file sees the stored record
    let (_, second) = get(create_test_app(&dir, true), uri).await;
    assert_eq!(second["is_cached"], true);
}
