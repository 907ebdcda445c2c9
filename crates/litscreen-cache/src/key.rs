//! Cache key derivation.

/// Derive the cache key for a search request.
///
/// The query is trimmed and case-folded so logically identical requests
/// collide; the paradigm and result limit are part of the keyed material so
/// requests differing in either never do. Keys are a fixed 16 hex chars,
/// short enough to double as file names under the file backend.
pub fn cache_key(query: &str, paradigm: &str, max_results: usize) -> String {
    let material = format!("{}:{}:{}", query.trim().to_lowercase(), paradigm, max_results);
    let digest = blake3::hash(material.as_bytes());
    digest.to_hex().as_str()[..16].to_string()
}
