//! Environment-sourced cache settings.
//!
//! Defaults are overlaid by an optional `litscreen.toml` and then by the
//! `SEARCH_CACHE_BACKEND`, `SEARCH_CACHE_TTL_HOURS` and `SEARCH_CACHE_DIR`
//! environment variables. There is no global cache instance; call sites
//! build a [`SearchCache`] from resolved settings and pass it around.

use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use litscreen_core::config::expand_path;
use litscreen_core::error::{Error, Result};

use crate::store::{Backend, SearchCache};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    pub backend: String,
    pub ttl_hours: f64,
    /// Cache directory for the file backend; `~` and `$VAR` are expanded.
    /// `None` means `~/.litscreen_cache`.
    pub dir: Option<String>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            ttl_hours: 24.0,
            dir: None,
        }
    }
}

impl CacheSettings {
    /// Resolve settings from defaults, `litscreen.toml`, and the
    /// `SEARCH_CACHE_*` environment, in increasing precedence.
    pub fn load() -> Result<Self> {
        Figment::from(Serialized::defaults(CacheSettings::default()))
            .merge(Toml::file("litscreen.toml"))
            .merge(Env::prefixed("SEARCH_CACHE_"))
            .extract()
            .map_err(|e| Error::InvalidConfig(format!("cache settings: {}", e)))
    }
}

impl SearchCache {
    /// Build a cache from resolved settings. Fails fast on an unknown
    /// backend name.
    pub fn from_settings(settings: &CacheSettings) -> Result<Self> {
        let backend: Backend = settings.backend.parse()?;
        if !settings.ttl_hours.is_finite() || settings.ttl_hours < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "ttl_hours must be a non-negative number, got {}",
                settings.ttl_hours
            )));
        }
        let ttl = Duration::from_secs_f64(settings.ttl_hours * 3600.0);
        let dir = settings.dir.as_deref().map(expand_path);
        SearchCache::new(backend, ttl, dir)
    }

    /// Build a cache straight from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_settings(&CacheSettings::load()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_contract() {
        let settings = CacheSettings::default();
        assert_eq!(settings.backend, "memory");
        assert_eq!(settings.ttl_hours, 24.0);
        assert!(settings.dir.is_none());
    }

    #[test]
    fn from_settings_rejects_unknown_backends() {
        let settings = CacheSettings {
            backend: "redis".to_string(),
            ..CacheSettings::default()
        };
        assert!(SearchCache::from_settings(&settings).is_err());
    }

    #[test]
    fn from_settings_rejects_negative_ttl() {
        let settings = CacheSettings {
            ttl_hours: -1.0,
            ..CacheSettings::default()
        };
        assert!(SearchCache::from_settings(&settings).is_err());
    }

    #[test]
    fn from_settings_builds_a_memory_store() {
        let settings = CacheSettings {
            ttl_hours: 1.0,
            ..CacheSettings::default()
        };
        let cache = SearchCache::from_settings(&settings).expect("memory cache");
        assert_eq!(cache.backend(), Backend::Memory);
        assert_eq!(cache.ttl(), Duration::from_secs(3600));
    }
}
