//! Catalog caching — store and retrieve the raw model catalog body.
//!
//! ## Freshness
//!
//! A single file in the system temp directory holds the last catalog
//! response verbatim. Freshness is judged by the file's modification time
//! against a fixed 6-hour TTL; staleness never invalidates the file, it
//! only changes whether the caller prefers network or file. The path is
//! shared across invocations and not guarded against concurrent writers:
//! a torn read shows up as a parse failure and the caller treats that the
//! same as a missing cache.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// How long a cached catalog is considered fresh.
pub const CACHE_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// File-backed cache for the raw catalog response.
pub struct CatalogCache {
    path: PathBuf,
}

impl CatalogCache {
    /// Create a cache backed by the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Cache at the well-known temp-directory location shared by all
    /// invocations of the tool.
    pub fn default_cache() -> Self {
        Self::new(std::env::temp_dir().join("glimpse_models.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the cache file exists and was written within the TTL.
    pub fn is_fresh(&self) -> bool {
        fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .ok()
            .and_then(|mtime| SystemTime::now().duration_since(mtime).ok())
            .map(|age| age < CACHE_TTL)
            .unwrap_or(false)
    }

    /// Read the cached body only if it is fresh.
    pub fn load_fresh(&self) -> Option<String> {
        if self.is_fresh() {
            self.load_any()
        } else {
            None
        }
    }

    /// Read the cached body regardless of age (stale fallback).
    pub fn load_any(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    /// Overwrite the cache with a fresh catalog body. Write failures are
    /// logged and swallowed: a missing cache only costs a future fetch.
    pub fn store(&self, body: &str) {
        if let Err(e) = fs::write(&self.path, body) {
            tracing::warn!("failed to write catalog cache {}: {e}", self.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_not_fresh() {
        let dir = TempDir::new().unwrap();
        let cache = CatalogCache::new(dir.path().join("models.json"));
        assert!(!cache.is_fresh());
        assert!(cache.load_fresh().is_none());
        assert!(cache.load_any().is_none());
    }

    #[test]
    fn test_store_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let cache = CatalogCache::new(dir.path().join("models.json"));
        cache.store(r#"{"data":[]}"#);
        assert!(cache.is_fresh());
        assert_eq!(cache.load_fresh().as_deref(), Some(r#"{"data":[]}"#));
    }

    #[test]
    fn test_old_file_is_stale_but_still_readable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("models.json");
        let cache = CatalogCache::new(path.clone());
        cache.store("[]");

        // Backdate the mtime past the TTL.
        let old = SystemTime::now() - CACHE_TTL - Duration::from_secs(60);
        let file = fs::File::options().append(true).open(&path).unwrap();
        file.set_modified(old).unwrap();
        drop(file);

        assert!(!cache.is_fresh());
        assert!(cache.load_fresh().is_none());
        assert_eq!(cache.load_any().as_deref(), Some("[]"));
    }

    #[test]
    fn test_store_to_unwritable_path_is_swallowed() {
        let cache = CatalogCache::new(PathBuf::from("/nonexistent/dir/models.json"));
        cache.store("[]");
        assert!(cache.load_any().is_none());
    }
}
