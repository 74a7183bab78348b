//! Key Derivation Module
//!
//! Builds a stable cache key from an external identifier and a provider tag,
//! falling back to a normalized title when no identifier is available.
//! Pure and deterministic: identical inputs always yield an identical key,
//! across process restarts.

// == Key Derivation ==
/// Derives the cache key for a lookup.
///
/// With an identifier: `lowercase(id) + "_" + lowercase(provider)`.
/// Without one, the normalized title substitutes for the identifier.
pub fn derive_key(external_id: Option<&str>, title: &str, provider: &str) -> String {
    let provider = provider.to_lowercase();
    match external_id {
        Some(id) if !id.trim().is_empty() => format!("{}_{}", id.to_lowercase(), provider),
        _ => format!("{}_{}", normalize_title(title), provider),
    }
}

// == Title Normalization ==
/// Normalizes a title for use as a key component: trims surrounding
/// whitespace, strips colons, replaces spaces and hyphens with underscores,
/// lower-cases.
fn normalize_title(title: &str) -> String {
    title
        .trim()
        .replace(':', "")
        .replace([' ', '-'], "_")
        .to_lowercase()
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_key() {
        assert_eq!(derive_key(Some("tt0111161"), "ignored", "imdb"), "tt0111161_imdb");
    }

    #[test]
    fn test_case_insensitive_identifier_and_provider() {
        let a = derive_key(Some("tt001"), "", "IMDB");
        let b = derive_key(Some("tt001"), "", "imdb");
        let c = derive_key(Some("TT001"), "", "imdb");
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a, "tt001_imdb");
    }

    #[test]
    fn test_title_fallback_normalization() {
        let key = derive_key(None, "Spider-Man: Far From Home", "kidsinmind");
        assert_eq!(key, "spider_man_far_from_home_kidsinmind");
    }

    #[test]
    fn test_blank_identifier_falls_back_to_title() {
        let key = derive_key(Some("  "), "The Batman", "dove");
        assert_eq!(key, "the_batman_dove");
    }

    #[test]
    fn test_title_with_surrounding_whitespace() {
        assert_eq!(
            derive_key(None, "  Up  ", "commonsense"),
            derive_key(None, "Up", "commonsense")
        );
    }

    #[test]
    fn test_deterministic() {
        let a = derive_key(None, "Finding Nemo", "movieguide");
        let b = derive_key(None, "Finding Nemo", "movieguide");
        assert_eq!(a, b);
    }
}
