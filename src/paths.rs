//! Bounded memoization of path-normalization lookups.
//!
//! Normalizing a document path for display goes through an external
//! [`SourceResolver`], which can be expensive (filesystem probing, path map
//! substitution). A compilation normalizes against only a handful of distinct
//! base paths, so a small bounded cache removes nearly all repeat lookups.
//! This module caches the resolver's *output* only; the normalization
//! algorithm itself lives outside this crate.
//!
//! # Thread Safety
//!
//! [`PathNormalizationCache`] is read-mostly and shared across encode workers.
//! Concurrent misses on the same key may both call the resolver and both
//! store; last-writer-wins on the identical value is harmless and never
//! corrupts state.

use dashmap::DashMap;

/// Default entry bound for [`PathNormalizationCache`].
///
/// The cache exists to avoid repeat normalization of the handful of distinct
/// base paths in a compilation, not to cache every document.
pub const NORMALIZATION_CACHE_CAPACITY: usize = 16;

/// External seam for path normalization.
///
/// Implemented by the host's source resolver; the embedding core never
/// normalizes paths itself. Returning `None` means the resolver has no
/// normalization for the path, in which case the path is used as written.
pub trait SourceResolver: Send + Sync {
    /// Normalize `path` relative to `base_path`, if a normalization exists.
    fn normalize_path(&self, path: &str, base_path: Option<&str>) -> Option<String>;
}

/// Bounded memoizing cache over `(path, base_path) -> normalized path`.
///
/// Eviction order is deliberately unspecified; the only contract is that the
/// entry count respects the bound. Created once per compilation and discarded
/// with it.
///
/// # Examples
///
/// ```rust
/// use srcembed::paths::{PathNormalizationCache, SourceResolver};
///
/// struct Upcase;
/// impl SourceResolver for Upcase {
///     fn normalize_path(&self, path: &str, _base: Option<&str>) -> Option<String> {
///         Some(path.to_uppercase())
///     }
/// }
///
/// let cache = PathNormalizationCache::new();
/// assert_eq!(cache.normalize(Some(&Upcase), "src/a.cs", None), "SRC/A.CS");
/// // no resolver: the path is meaningful only as written
/// assert_eq!(cache.normalize(None, "src/a.cs", None), "src/a.cs");
/// ```
#[derive(Debug)]
pub struct PathNormalizationCache {
    entries: DashMap<(String, Option<String>), String>,
    capacity: usize,
}

impl PathNormalizationCache {
    /// Create a cache bounded at [`NORMALIZATION_CACHE_CAPACITY`] entries.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(NORMALIZATION_CACHE_CAPACITY)
    }

    /// Create a cache bounded at `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        PathNormalizationCache {
            entries: DashMap::new(),
            capacity,
        }
    }

    /// Normalize `path` against `base_path`, memoizing the resolver's answer.
    ///
    /// Without a resolver the path is returned unchanged - normalization is
    /// only meaningful relative to one. On a miss the resolver is consulted,
    /// falling back to `path` itself when it returns `None`, and the result
    /// is stored under the `(path, base_path)` key.
    #[must_use]
    pub fn normalize(
        &self,
        resolver: Option<&dyn SourceResolver>,
        path: &str,
        base_path: Option<&str>,
    ) -> String {
        let Some(resolver) = resolver else {
            return path.to_string();
        };

        let key = (path.to_string(), base_path.map(str::to_string));
        if let Some(hit) = self.entries.get(&key) {
            return hit.clone();
        }

        let normalized = resolver
            .normalize_path(path, base_path)
            .unwrap_or_else(|| path.to_string());

        // Any bound-respecting policy is acceptable; drop arbitrary residents
        // until there is room. Transient overshoot under concurrent misses is
        // tolerated and self-corrects on the next insert.
        while self.entries.len() >= self.capacity {
            let Some(victim) = self.entries.iter().next().map(|e| e.key().clone()) else {
                break;
            };
            self.entries.remove(&victim);
        }
        self.entries.insert(key, normalized.clone());

        normalized
    }

    /// Number of entries currently resident.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no lookups have been cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PathNormalizationCache {
    fn default() -> Self {
        Self::new()
    }
}
