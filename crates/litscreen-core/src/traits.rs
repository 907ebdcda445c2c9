use crate::types::SearchRecord;

/// External search backend the cache layer wraps.
///
/// A failed lookup is the `Err` variant; providers must not smuggle error
/// markers inside the record payload. An empty `Ok` is a valid "nothing
/// found" answer.
pub trait SearchProvider: Send + Sync {
    fn search(&self, query: &str, max_results: usize) -> anyhow::Result<Vec<SearchRecord>>;
}
