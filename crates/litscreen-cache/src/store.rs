//! Search-result cache with memory and flat-file backends.
//!
//! Expiry is lazy: entries are age-checked when read and a stale entry is
//! removed at that point. There is no background sweeper; the file backend
//! unlinks stale files at read time only.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use litscreen_core::config::expand_path;
use litscreen_core::error::{Error, Result};
use litscreen_core::types::SearchRecord;

use crate::key::cache_key;

/// Which storage a [`SearchCache`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Memory,
    File,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Memory => "memory",
            Backend::File => "file",
        }
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "memory" => Ok(Backend::Memory),
            "file" => Ok(Backend::File),
            other => Err(Error::InvalidConfig(format!(
                "unknown cache backend '{}' (expected 'memory' or 'file')",
                other
            ))),
        }
    }
}

/// On-disk form of one cached entry, one JSON file per key.
///
/// `query` and `paradigm` are written for human inspection of the file;
/// only `timestamp` and `results` are ever read back.
#[derive(Debug, Serialize, Deserialize)]
struct FileEntry {
    timestamp: f64,
    query: String,
    paradigm: String,
    results: Vec<SearchRecord>,
}

/// Snapshot returned by [`SearchCache::stats`].
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub backend: &'static str,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: String,
    pub ttl_hours: f64,
}

/// Cache for literature search results keyed by
/// `(query, paradigm, max_results)`.
///
/// `get`/`set` take `&self`; the store can be shared across batch workers
/// behind an `Arc`. The counters are atomic and the memory map is mutex
/// guarded, so concurrent callers never lose hit/miss updates.
pub struct SearchCache {
    backend: Backend,
    ttl: Duration,
    memory: Mutex<HashMap<String, (f64, Vec<SearchRecord>)>>,
    cache_dir: Option<PathBuf>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SearchCache {
    /// Create a cache with a uniform TTL for all entries.
    ///
    /// For the file backend the directory (default `~/.litscreen_cache`) is
    /// created if absent; an un-creatable directory is a construction error,
    /// not a silent all-miss store.
    pub fn new(backend: Backend, ttl: Duration, cache_dir: Option<PathBuf>) -> Result<Self> {
        let cache_dir = match backend {
            Backend::Memory => None,
            Backend::File => {
                let dir = cache_dir.unwrap_or_else(|| expand_path("~/.litscreen_cache"));
                fs::create_dir_all(&dir).map_err(|e| {
                    Error::Operation(format!("create cache dir {}: {}", dir.display(), e))
                })?;
                Some(dir)
            }
        };

        Ok(Self {
            backend,
            ttl,
            memory: Mutex::new(HashMap::new()),
            cache_dir,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    /// Cached results for a request, or `None` on a miss.
    ///
    /// Never errors: an expired entry, a corrupt file, or any backend I/O
    /// failure all count as a miss so the cache cannot block the caller's
    /// primary path. Reading an expired entry removes it.
    pub fn get(&self, query: &str, paradigm: &str, max_results: usize) -> Option<Vec<SearchRecord>> {
        let key = cache_key(query, paradigm, max_results);
        let found = match self.backend {
            Backend::Memory => self.get_memory(&key),
            Backend::File => self.get_file(&key),
        };
        match found {
            Some(results) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(results)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store results for a request. Best-effort: serialization or write
    /// failures are logged at debug and swallowed.
    pub fn set(&self, query: &str, paradigm: &str, max_results: usize, results: Vec<SearchRecord>) {
        let key = cache_key(query, paradigm, max_results);
        match self.backend {
            Backend::Memory => {
                let mut map = self.memory.lock().expect("cache mutex poisoned");
                map.insert(key, (now_epoch(), results));
            }
            Backend::File => self.set_file(&key, query, paradigm, results),
        }
    }

    /// Drop every entry for the active backend and reset the counters.
    pub fn clear(&self) {
        match self.backend {
            Backend::Memory => {
                self.memory.lock().expect("cache mutex poisoned").clear();
            }
            Backend::File => {
                if let Some(dir) = self.cache_dir.as_ref() {
                    remove_entry_files(dir);
                }
            }
        }
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Hit/miss accounting since construction or the last `clear`.
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        CacheStats {
            backend: self.backend.as_str(),
            hits,
            misses,
            hit_rate: format!("{:.1}%", hit_rate * 100.0),
            ttl_hours: self.ttl.as_secs_f64() / 3600.0,
        }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Directory holding entry files; `None` for the memory backend.
    pub fn cache_dir(&self) -> Option<&Path> {
        self.cache_dir.as_deref()
    }

    fn get_memory(&self, key: &str) -> Option<Vec<SearchRecord>> {
        let mut map = self.memory.lock().expect("cache mutex poisoned");
        let expired = match map.get(key) {
            None => return None,
            Some((stored_at, _)) => now_epoch() - *stored_at > self.ttl.as_secs_f64(),
        };
        if expired {
            map.remove(key);
            return None;
        }
        map.get(key).map(|(_, results)| results.clone())
    }

    fn get_file(&self, key: &str) -> Option<Vec<SearchRecord>> {
        let dir = self.cache_dir.as_ref()?;
        let path = dir.join(format!("{}.json", key));

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::debug!("cache read failed for {}: {}", path.display(), e);
                return None;
            }
        };

        // Corrupt or partially written files read as a miss.
        let entry: FileEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("cache entry {} unreadable: {}", path.display(), e);
                return None;
            }
        };

        if now_epoch() - entry.timestamp > self.ttl.as_secs_f64() {
            if let Err(e) = fs::remove_file(&path) {
                tracing::debug!("stale cache entry {} not removed: {}", path.display(), e);
            }
            return None;
        }

        Some(entry.results)
    }

    fn set_file(&self, key: &str, query: &str, paradigm: &str, results: Vec<SearchRecord>) {
        let Some(dir) = self.cache_dir.as_ref() else {
            return;
        };
        let path = dir.join(format!("{}.json", key));
        let entry = FileEntry {
            timestamp: now_epoch(),
            query: query.to_string(),
            paradigm: paradigm.to_string(),
            results,
        };

        let body = match serde_json::to_string(&entry) {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("cache entry for '{}' not serializable: {}", query, e);
                return;
            }
        };
        if let Err(e) = fs::write(&path, body) {
            tracing::debug!("cache write failed for {}: {}", path.display(), e);
        }
    }
}

fn remove_entry_files(dir: &Path) {
    for entry in walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .flatten()
    {
        let path = entry.path();
        if path.extension().map_or(false, |ext| ext == "json") {
            if let Err(e) = fs::remove_file(path) {
                tracing::debug!("cache entry {} not removed: {}", path.display(), e);
            }
        }
    }
}

fn now_epoch() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names_round_trip() {
        assert_eq!("memory".parse::<Backend>().unwrap(), Backend::Memory);
        assert_eq!("file".parse::<Backend>().unwrap(), Backend::File);
        assert_eq!(Backend::File.as_str(), "file");
    }

    #[test]
    fn unknown_backend_is_a_config_error() {
        let err = "redis".parse::<Backend>().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)), "got {:?}", err);
    }

    #[test]
    fn stats_on_a_fresh_store_are_zero() {
        let cache = SearchCache::new(Backend::Memory, Duration::from_secs(60), None).unwrap();
        let stats = cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.hit_rate, "0.0%");
    }
}
