//! Minimal key/value memo store.
//!
//! [`Cache`] is deliberately small: string keys, one value type, no
//! eviction and no expiry. Entries live as long as the cache does.
//!
//! The cache does no locking of its own. [`Client`](crate::Client) keeps
//! one per instance behind a `tokio::sync::RwLock`; anyone sharing a cache
//! across tasks must do the same.

use std::collections::HashMap;

/// Mapping from string key to a value of type `V`.
#[derive(Debug, Clone)]
pub struct Cache<V> {
    entries: HashMap<String, V>,
}

impl<V> Cache<V> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Look up `key`.
    ///
    /// Returns `None` when nothing was stored under `key`, which is distinct
    /// from any stored value (an empty string or `None` included).
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    /// Store `value` under `key`, overwriting any previous entry.
    pub fn set<K: Into<String>>(&mut self, key: K, value: V) {
        self.entries.insert(key.into(), value);
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<V> Default for Cache<V> {
    fn default() -> Self {
        Self::new()
    }
}
