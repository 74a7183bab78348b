//! Provider Module
//!
//! The seam between the cache/API core and the per-site scrapers. Each
//! scraper is an external collaborator implementing [`Provider`]; the
//! registry dispatches a requested provider tag to one of them.

mod omdb;

pub use omdb::OmdbClient;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ReviewRecord;

// == Provider Trait ==
/// A single review source.
///
/// Implementations fetch and parse one site's parental-guidance page for a
/// title. A failed lookup may be reported either as an error or as a record
/// with `status: Failed` and no review items; only records with review items
/// get persisted by the caller.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable lower-case tag identifying this source, e.g. "imdb"
    fn name(&self) -> &str;

    /// Fetches the review record for a title.
    async fn fetch(&self, external_id: Option<&str>, title: &str) -> Result<ReviewRecord>;
}

// == Provider Registry ==
/// Ordered collection of review sources.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn Provider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a provider. Later registrations do not shadow earlier ones.
    pub fn register(&mut self, provider: Arc<dyn Provider>) {
        self.providers.push(provider);
    }

    /// Resolves a requested tag to the first provider whose name it
    /// contains. Requests like `provider=kidsinmind.com` therefore still
    /// dispatch to the `kidsinmind` source.
    pub fn resolve(&self, tag: &str) -> Option<Arc<dyn Provider>> {
        let tag = tag.to_lowercase();
        self.providers
            .iter()
            .find(|p| tag.contains(&p.name().to_lowercase()))
            .cloned()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.providers.iter().map(|p| p.name()).collect();
        f.debug_struct("ProviderRegistry").field("providers", &names).finish()
    }
}
