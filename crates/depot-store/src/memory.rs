use std::collections::BTreeMap;
use std::sync::RwLock;

use depot_types::Fingerprint;

use crate::error::{StoreError, StoreResult};
use crate::key::{KeyId, KeyName};
use crate::traits::{ContentStore, Sink, Source};

/// In-memory, BTreeMap-based content store.
///
/// Intended for tests and embedding. Entries are held behind a `RwLock` for
/// safe concurrent access; bytes are cloned on read so decoded values never
/// alias store state. Keys iterate in `(id, kind)` order, so `keys` and
/// `match_keys` are deterministic.
///
/// There is no buffering and no cache, so `synchronise` is a no-op that
/// always succeeds.
pub struct MemoryStore<K: KeyId> {
    entries: RwLock<BTreeMap<KeyName<K>, Vec<u8>>>,
}

impl<K: KeyId> MemoryStore<K> {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("lock poisoned").is_empty()
    }

    /// Total serialized bytes across all entries.
    pub fn total_bytes(&self) -> u64 {
        self.entries
            .read()
            .expect("lock poisoned")
            .values()
            .map(|bytes| bytes.len() as u64)
            .sum()
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.entries.write().expect("lock poisoned").clear();
    }
}

impl<K: KeyId> Default for MemoryStore<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: KeyId> Source<K> for MemoryStore<K> {
    fn read_raw(&self, name: &KeyName<K>) -> StoreResult<Vec<u8>> {
        let map = self.entries.read().expect("lock poisoned");
        map.get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    fn keys(&self) -> StoreResult<Vec<KeyName<K>>> {
        let map = self.entries.read().expect("lock poisoned");
        Ok(map.keys().cloned().collect())
    }
}

impl<K: KeyId> Sink<K> for MemoryStore<K> {
    fn write_raw(&self, name: KeyName<K>, bytes: Vec<u8>) -> StoreResult<()> {
        self.entries
            .write()
            .expect("lock poisoned")
            .insert(name, bytes);
        Ok(())
    }

    fn remove_raw(&self, name: &KeyName<K>) -> StoreResult<()> {
        self.entries.write().expect("lock poisoned").remove(name);
        Ok(())
    }
}

impl<K: KeyId> ContentStore<K> for MemoryStore<K> {
    fn synchronise(&self) -> StoreResult<()> {
        Ok(())
    }

    fn fingerprint(&self, name: &KeyName<K>) -> StoreResult<Fingerprint> {
        let map = self.entries.read().expect("lock poisoned");
        map.get(name)
            .map(|bytes| Fingerprint::of(bytes))
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }
}

impl<K: KeyId> std::fmt::Debug for MemoryStore<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("entry_count", &self.len())
            .finish()
    }
}
