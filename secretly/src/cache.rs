//! Secret content cached by name and version.

use std::collections::HashMap;

use parking_lot::RwLock;

/// Storage for fetched secret content.
///
/// Entries are immutable once fetched; there is no eviction. Implementations
/// must be safe to share between concurrent resolutions.
pub trait SecretCache: Send + Sync {
    /// Store `content` under `name` and `version`, replacing any entry.
    fn add(&self, name: &str, version: &str, content: Vec<u8>);

    /// Content stored under `name` and `version`, if any.
    fn get(&self, name: &str, version: &str) -> Option<Vec<u8>>;
}

/// In-memory cache keyed by secret name, then version.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, HashMap<String, Vec<u8>>>>,
}

impl MemoryCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached `(name, version)` pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().values().map(HashMap::len).sum()
    }

    /// Whether nothing has been cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl SecretCache for MemoryCache {
    fn add(&self, name: &str, version: &str, content: Vec<u8>) {
        self.entries
            .write()
            .entry(name.to_owned())
            .or_default()
            .insert(version.to_owned(), content);
    }

    fn get(&self, name: &str, version: &str) -> Option<Vec<u8>> {
        self.entries
            .read()
            .get(name)
            .and_then(|versions| versions.get(version))
            .cloned()
    }
}

/// A cache that never stores anything, used to disable caching.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpCache;

impl SecretCache for NoOpCache {
    fn add(&self, _name: &str, _version: &str, _content: Vec<u8>) {}

    fn get(&self, _name: &str, _version: &str) -> Option<Vec<u8>> {
        None
    }
}
