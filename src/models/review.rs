//! Review record models
//!
//! The logical value shape stored under a cache key: one provider's
//! parental-guidance review of a title. The cache engine itself is agnostic
//! to this shape; it is a contract between the API layer and the providers.

use serde::{Deserialize, Serialize};

/// Outcome of a provider fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewStatus {
    Success,
    Failed,
}

/// One rated content category (violence, language, ...) within a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewItem {
    /// Category name, e.g. "Sex & Nudity" or "Violence"
    pub name: String,
    /// Normalized severity score (0.0 - 5.0)
    pub score: Option<f64>,
    /// Free-text description from the provider
    pub description: Option<String>,
    /// Severity bucket, e.g. "None", "Mild", "Moderate", "Severe"
    pub cat: Option<String>,
    /// Vote count backing the rating, where the provider exposes one
    pub votes: Option<u64>,
}

/// A provider's full review of one movie/TV show.
///
/// Field names on the wire keep the hyphenated form consumers of this API
/// already rely on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// External identifier (IMDb id), when known
    pub id: Option<String>,
    pub status: ReviewStatus,
    pub title: String,
    pub provider: String,
    #[serde(rename = "recommended-age")]
    pub recommended_age: Option<u32>,
    /// `None` when the provider had no usable data
    #[serde(rename = "review-items")]
    pub review_items: Option<Vec<ReviewItem>>,
    #[serde(rename = "review-link")]
    pub review_link: Option<String>,
}

impl ReviewRecord {
    /// A failure placeholder, mirroring what providers return when a title
    /// cannot be found or parsed.
    pub fn failure(id: Option<&str>, title: &str, provider: &str) -> Self {
        Self {
            id: id.map(str::to_string),
            status: ReviewStatus::Failed,
            title: title.to_string(),
            provider: provider.to_string(),
            recommended_age: None,
            review_items: None,
            review_link: None,
        }
    }

    /// True when the record carries at least one review item. Only such
    /// records are worth persisting.
    pub fn has_review_items(&self) -> bool {
        self.review_items.as_ref().is_some_and(|items| !items.is_empty())
    }

    /// Severity bucket of the "Sex & Nudity" item, when present.
    pub fn sex_nudity_category(&self) -> Option<&str> {
        self.review_items
            .as_ref()?
            .iter()
            .find(|item| item.name == "Sex & Nudity")
            .and_then(|item| item.cat.as_deref())
    }
}
