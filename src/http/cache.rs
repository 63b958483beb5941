//! HTTP cache control module
//!
//! `ETag` generation and conditional request handling for static assets.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a quoted `ETag` from the asset bytes using fast hashing
pub fn entity_tag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check if the client's `If-None-Match` header matches the server's `ETag`.
///
/// Handles a single tag, a comma-separated list, and the `*` wildcard.
/// A match means the client copy is fresh and a 304 should be returned.
pub fn matches_if_none_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .any(|e| e.trim() == etag || e.trim() == "*")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_tag_is_quoted() {
        let etag = entity_tag(b"hello world");
        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        assert!(etag.len() > 2);
    }

    #[test]
    fn test_entity_tag_tracks_content() {
        assert_eq!(entity_tag(b"same content"), entity_tag(b"same content"));
        assert_ne!(entity_tag(b"content a"), entity_tag(b"content b"));
    }

    #[test]
    fn test_if_none_match() {
        let etag = "\"abc123\"";
        assert!(matches_if_none_match(Some("\"abc123\""), etag));
        assert!(matches_if_none_match(Some("\"xyz\", \"abc123\""), etag));
        assert!(matches_if_none_match(Some("*"), etag));
        assert!(!matches_if_none_match(Some("\"different\""), etag));
        assert!(!matches_if_none_match(None, etag));
    }
}
