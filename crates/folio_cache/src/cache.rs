//! Locator cache implementation.

use crate::{EvictionPolicy, LruPolicy, Unbounded};
use derive_getters::Getters;
use folio_core::CacheSettings;
use folio_error::FolioResult;
use folio_storage::{Locator, StorageBackend};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Hit and miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters)]
pub struct CacheStats {
    hits: u64,
    misses: u64,
    evictions: u64,
}

#[derive(Debug)]
struct CacheState {
    entries: HashMap<String, Locator>,
    policy: Box<dyn EvictionPolicy>,
    stats: CacheStats,
}

impl CacheState {
    fn store(&mut self, filename: &str, locator: Locator) {
        if let Some(evicted) = self.policy.record_insert(filename) {
            tracing::debug!(evicted = %evicted, "Evicting locator");
            self.entries.remove(&evicted);
            self.stats.evictions += 1;
        }
        self.entries.insert(filename.to_string(), locator);
    }
}

/// Memoizes filename → locator for one storage root.
///
/// Owned by a single manager. The whole check-resolve-store sequence runs under
/// one lock, so concurrent resolutions of a filename agree on one locator.
///
/// # Example
///
/// ```
/// use folio_cache::ResourceLocatorCache;
/// use folio_core::ContentKind;
/// use folio_storage::{MemoryBackend, StorageBackend};
///
/// let backend = MemoryBackend::new("diary");
/// let doc = backend.create_file(ContentKind::Image, "img_0001.jpg").unwrap();
///
/// let cache = ResourceLocatorCache::unbounded();
/// let first = cache.resolve("img_0001.jpg", &backend).unwrap();
/// let second = cache.resolve("img_0001.jpg", &backend).unwrap();
/// assert_eq!(first, *doc.locator());
/// assert_eq!(first, second);
/// assert_eq!(*cache.stats().hits(), 1);
/// ```
#[derive(Debug)]
pub struct ResourceLocatorCache {
    fast_path: bool,
    state: Mutex<CacheState>,
}

impl ResourceLocatorCache {
    /// Create a cache with the given eviction policy.
    pub fn new(policy: Box<dyn EvictionPolicy>) -> Self {
        tracing::debug!(?policy, "Creating locator cache");
        Self {
            fast_path: false,
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                policy,
                stats: CacheStats::default(),
            }),
        }
    }

    /// Create a cache that never evicts.
    pub fn unbounded() -> Self {
        Self::new(Box::new(Unbounded))
    }

    /// Create a cache from configuration: LRU when `max_entries` is set,
    /// unbounded otherwise.
    pub fn from_settings(settings: &CacheSettings) -> Self {
        let policy: Box<dyn EvictionPolicy> = match settings.max_entries() {
            Some(capacity) => Box::new(LruPolicy::new(*capacity)),
            None => Box::new(Unbounded),
        };
        Self::new(policy).with_fast_path(*settings.fast_path_locators())
    }

    /// Build missing locators from the backend's addressing scheme instead of
    /// looking them up.
    ///
    /// Falls back to a lookup when the backend has no scheme. Debug builds
    /// check each constructed locator against the lookup when the file exists.
    pub fn with_fast_path(mut self, enabled: bool) -> Self {
        self.fast_path = enabled;
        self
    }

    /// Whether the fast path is enabled.
    pub fn fast_path(&self) -> bool {
        self.fast_path
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            tracing::warn!("Locator cache lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Resolve a filename, asking the backend only on the first call.
    ///
    /// A cached locator is returned unchanged on every later call, even if the
    /// file has since been deleted. Lookup failures are not cached.
    ///
    /// # Errors
    ///
    /// `NotFound` if the filename is uncached and the backend has no such file.
    #[tracing::instrument(skip(self, backend), fields(backend = backend.backend_name()))]
    pub fn resolve(&self, filename: &str, backend: &dyn StorageBackend) -> FolioResult<Locator> {
        let mut state = self.lock();

        if let Some(locator) = state.entries.get(filename).cloned() {
            state.policy.record_access(filename);
            state.stats.hits += 1;
            tracing::trace!(locator = %locator, "Locator cache hit");
            return Ok(locator);
        }

        state.stats.misses += 1;
        let locator = match self.fast_path.then(|| backend.canonical_locator(filename)).flatten() {
            Some(constructed) => {
                if cfg!(debug_assertions)
                    && let Ok(doc) = backend.find_file(filename)
                {
                    debug_assert_eq!(
                        doc.locator(),
                        &constructed,
                        "fast-path locator disagrees with backend lookup"
                    );
                }
                constructed
            }
            None => backend.find_file(filename)?.locator().clone(),
        };

        tracing::debug!(locator = %locator, fast_path = self.fast_path, "Cached new locator");
        state.store(filename, locator.clone());
        Ok(locator)
    }

    /// Cached locator for a filename, without touching the backend.
    pub fn get(&self, filename: &str) -> Option<Locator> {
        self.lock().entries.get(filename).cloned()
    }

    /// Record a locator obtained elsewhere, replacing any cached one.
    pub fn insert(&self, filename: &str, locator: Locator) {
        self.lock().store(filename, locator);
    }

    /// Record a locator only if the filename has no cached entry yet.
    ///
    /// Returns whether the locator was stored. An existing entry is kept
    /// verbatim, even when it points at a deleted file.
    pub fn insert_if_absent(&self, filename: &str, locator: Locator) -> bool {
        let mut state = self.lock();
        if state.entries.contains_key(filename) {
            tracing::debug!(filename, "Keeping existing locator");
            return false;
        }
        state.store(filename, locator);
        true
    }

    /// Forget a filename. Returns whether it was cached.
    pub fn invalidate(&self, filename: &str) -> bool {
        let mut state = self.lock();
        state.policy.record_remove(filename);
        let removed = state.entries.remove(filename).is_some();
        if removed {
            tracing::debug!(filename, "Invalidated locator");
        }
        removed
    }

    /// Forget every filename and reset the counters.
    pub fn clear(&self) {
        let mut state = self.lock();
        let count = state.entries.len();
        state.entries.clear();
        state.policy.reset();
        state.stats = CacheStats::default();
        tracing::info!(cleared = count, "Cleared locator cache");
    }

    /// Number of cached filenames.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Snapshot of the hit and miss counters.
    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }
}

impl Default for ResourceLocatorCache {
    fn default() -> Self {
        Self::unbounded()
    }
}
