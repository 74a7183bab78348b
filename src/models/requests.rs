//! Request DTOs for the ratings API
//!
//! Defines the structure of incoming query strings.

use serde::Deserialize;

/// Query parameters for the lookup operation (GET /get_data)
///
/// # Fields
/// - `imdb_id`: External identifier, preferred for key derivation
/// - `video_name`: Title, used when no identifier is supplied
/// - `release_year`: Optional disambiguation hint, logged only
/// - `provider`: Review source tag, required
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupParams {
    pub imdb_id: Option<String>,
    pub video_name: Option<String>,
    pub release_year: Option<String>,
    #[serde(default)]
    pub provider: String,
}

impl LookupParams {
    /// Validates the request data.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.provider.trim().is_empty() {
            return Some("Provider parameter is required".to_string());
        }
        None
    }

    /// The title with transport noise removed: `+`/`%20` become spaces,
    /// stray colons (and their escaped form) are dropped. Returns None when
    /// nothing usable remains.
    pub fn cleaned_video_name(&self) -> Option<String> {
        let name = self
            .video_name
            .as_deref()?
            .replace('+', " ")
            .replace("%20", " ")
            .replace("%3A", "")
            .replace(':', "");
        let name = name.trim().to_string();
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}
