//! OMDB title resolution
//!
//! Resolves a title from an IMDb identifier when a lookup arrives with only
//! the identifier. Responses are cached through the same facade as review
//! records, under their own key prefix.

use std::env;

use serde_json::Value;
use tracing::{info, warn};

use crate::cache::ReviewCache;
use crate::error::{CacheError, Result};

const OMDB_ENDPOINT: &str = "http://www.omdbapi.com/";

// == OMDB Client ==
/// Thin client for the OMDB lookup API.
#[derive(Debug, Clone)]
pub struct OmdbClient {
    http: reqwest::Client,
    api_key: String,
}

impl OmdbClient {
    /// Creates a client with the given API key.
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }

    /// Reads `OMDB_API_KEY` from the environment; `None` disables
    /// resolution entirely.
    pub fn from_env() -> Option<Self> {
        match env::var("OMDB_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Some(Self::new(key)),
            _ => None,
        }
    }

    // == Title Lookup ==
    /// Resolves the title for an IMDb identifier, consulting the cache
    /// first. Returns `Ok(None)` when OMDB has no match.
    pub async fn title_for_id(&self, cache: &ReviewCache, imdb_id: &str) -> Result<Option<String>> {
        let cache_key = format!("omdb_title_{imdb_id}");

        if let Some(cached) = cache.get(&cache_key)? {
            info!("Retrieved title for {imdb_id} from OMDB cache");
            return Ok(extract_title(&cached));
        }

        let response = self
            .http
            .get(OMDB_ENDPOINT)
            .query(&[("i", imdb_id), ("apikey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| CacheError::Upstream(format!("OMDB request failed: {e}")))?
            .error_for_status()
            .map_err(|e| CacheError::Upstream(format!("OMDB returned an error status: {e}")))?;

        let data: Value = response
            .json()
            .await
            .map_err(|e| CacheError::Upstream(format!("OMDB response was not JSON: {e}")))?;

        if data.get("Response").and_then(Value::as_str) == Some("True") {
            cache.set(&cache_key, &data, None);
            Ok(extract_title(&data))
        } else {
            warn!("No OMDB match for IMDb id {imdb_id}");
            Ok(None)
        }
    }
}

fn extract_title(data: &Value) -> Option<String> {
    data.get("Title").and_then(Value::as_str).map(str::to_string)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_extract_title() {
        let data = json!({"Response": "True", "Title": "The Iron Giant"});
        assert_eq!(extract_title(&data).as_deref(), Some("The Iron Giant"));
        assert_eq!(extract_title(&json!({"Response": "False"})), None);
    }

    #[tokio::test]
    async fn test_cached_response_short_circuits_network() {
        let dir = TempDir::new().unwrap();
        let cache =
            ReviewCache::open(&dir.path().join("cache.sqlite"), Duration::from_secs(60)).unwrap();
        cache.set(
            "omdb_title_tt0129167",
            &json!({"Response": "True", "Title": "The Iron Giant"}),
            None,
        );

        // Bogus key: any network round trip would fail, so a result proves
        // the cache answered.
        let client = OmdbClient::new("unused-key".to_string());
        let title = client.title_for_id(&cache, "tt0129167").await.unwrap();
        assert_eq!(title.as_deref(), Some("The Iron Giant"));
    }
}
