//! API Handlers
//!
//! HTTP request handlers for each ratings server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::{derive_key, ReviewCache};
use crate::error::{CacheError, Result};
use crate::models::{HealthResponse, LookupParams, StatsResponse};
use crate::providers::{OmdbClient, ProviderRegistry};

/// Application state shared across all handlers.
///
/// Holds the process-wide cache handle and the provider registry; created
/// once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    /// Persistent review cache
    pub cache: Arc<ReviewCache>,
    /// Registered review sources
    pub providers: Arc<ProviderRegistry>,
    /// Optional OMDB resolver for identifier-only lookups
    pub omdb: Option<Arc<OmdbClient>>,
}

impl AppState {
    /// Creates a new AppState from a cache and provider registry.
    pub fn new(cache: ReviewCache, providers: ProviderRegistry) -> Self {
        Self {
            cache: Arc::new(cache),
            providers: Arc::new(providers),
            omdb: None,
        }
    }

    /// Enables OMDB title resolution.
    pub fn with_omdb(mut self, omdb: OmdbClient) -> Self {
        self.omdb = Some(Arc::new(omdb));
        self
    }
}

/// Handler for GET /get_data
///
/// Derives the cache key for the lookup, serves a fresh cached record when
/// one exists, and otherwise fetches from the requested provider, persisting
/// the result only when it actually contains review items.
pub async fn get_data_handler(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Result<Json<Value>> {
    if let Some(error_msg) = params.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let provider_tag = params.provider.to_lowercase();
    let imdb_id = params
        .imdb_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());
    let video_name = params.cleaned_video_name();
    info!(
        "Request parameters: imdb_id={:?}, video_name={:?}, release_year={:?}, provider={}",
        imdb_id, video_name, params.release_year, provider_tag
    );

    if imdb_id.is_none() && video_name.is_none() {
        return Err(CacheError::InvalidRequest(
            "Either imdb_id or video_name is required".to_string(),
        ));
    }

    let key = derive_key(imdb_id, video_name.as_deref().unwrap_or(""), &provider_tag);
    debug!("Cache key: {key}");

    if let Some(mut value) = state.cache.get(&key)? {
        info!("Returning cached result for key {key}");
        if let Some(obj) = value.as_object_mut() {
            obj.insert("is_cached".to_string(), Value::Bool(true));
        }
        return Ok(Json(value));
    }

    // Cache miss: make sure we have a title to hand to the provider
    let title = match video_name {
        Some(name) => name,
        None => {
            let Some(id) = imdb_id else {
                return Err(CacheError::InvalidRequest(
                    "Either imdb_id or video_name is required".to_string(),
                ));
            };
            let resolved = match &state.omdb {
                Some(omdb) => omdb.title_for_id(&state.cache, id).await?,
                None => None,
            };
            resolved.ok_or_else(|| {
                CacheError::InvalidRequest("Could not retrieve video name from OMDB".to_string())
            })?
        }
    };

    let Some(provider) = state.providers.resolve(&provider_tag) else {
        return Err(CacheError::InvalidRequest(format!(
            "Unknown provider: {provider_tag}"
        )));
    };

    info!("Fetching fresh data for {title} from {}", provider.name());
    let record = provider.fetch(imdb_id, &title).await?;
    debug!(
        "Sex & Nudity category for {title}: {:?}",
        record.sex_nudity_category()
    );

    let mut value = serde_json::to_value(&record)
        .map_err(|e| CacheError::Internal(format!("unserializable record: {e}")))?;

    if record.has_review_items() {
        info!(
            "Storing result in cache for [{}] [{}]",
            record.title, record.provider
        );
        state.cache.set(&key, &value, None);
    } else {
        warn!(
            "Not storing result in cache due to null review-items for [{}] [{}]",
            record.title, record.provider
        );
    }

    if let Some(obj) = value.as_object_mut() {
        obj.insert("is_cached".to_string(), Value::Bool(false));
    }
    Ok(Json(value))
}

/// Handler for GET /stats
///
/// Returns the number of cached records.
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let cached_records = state.cache.count()?;
    Ok(Json(StatsResponse { cached_records }))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
