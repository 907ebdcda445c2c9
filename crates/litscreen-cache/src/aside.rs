//! Cache-aside wrapper around a [`SearchProvider`].

use litscreen_core::traits::SearchProvider;
use litscreen_core::types::SearchRecord;

use crate::store::SearchCache;

/// Consult the cache first, fall back to the provider on a miss, and
/// populate the cache from successful lookups.
///
/// Upstream failures and empty result sets are handed back to the caller
/// but never written to the cache, so the next identical call retries the
/// provider instead of replaying a transient failure. Per call there is
/// exactly zero or one cache write and zero or one provider invocation.
pub fn cached_search<P>(
    cache: &SearchCache,
    provider: &P,
    query: &str,
    paradigm: &str,
    max_results: usize,
) -> anyhow::Result<Vec<SearchRecord>>
where
    P: SearchProvider + ?Sized,
{
    if let Some(results) = cache.get(query, paradigm, max_results) {
        return Ok(results);
    }

    let results = provider.search(query, max_results)?;
    if !results.is_empty() {
        cache.set(query, paradigm, max_results, results.clone());
    }
    Ok(results)
}
