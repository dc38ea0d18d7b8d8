use depot_types::Fingerprint;

use crate::codec::Codec;
use crate::entry::Entry;
use crate::error::StoreResult;
use crate::key::{Key, KeyId, KeyName};

/// Read access to a content store.
///
/// Backends implement the two raw operations; the typed operations are
/// provided on top and dispatch to the codec carried by each key. Nothing
/// here decodes content unless a typed read asks for it: `keys` and
/// `match_keys` operate over key metadata only.
pub trait Source<K: KeyId> {
    /// Read the raw serialized bytes for a key.
    ///
    /// Fails with [`StoreError::NotFound`](crate::StoreError::NotFound) if
    /// no entry exists for `name`.
    fn read_raw(&self, name: &KeyName<K>) -> StoreResult<Vec<u8>>;

    /// Every key currently present in the store.
    fn keys(&self) -> StoreResult<Vec<KeyName<K>>>;

    /// Read and decode the content stored under `key`.
    fn get<C: Codec>(&self, key: &Key<K, C>) -> StoreResult<C::Value> {
        let bytes = self.read_raw(key.name())?;
        key.codec().decode(&bytes)
    }

    /// Every key whose `(id, kind)` satisfies the predicate.
    ///
    /// Order is unspecified by this trait; deterministic backends document
    /// their ordering.
    fn match_keys<P>(&self, predicate: P) -> StoreResult<Vec<KeyName<K>>>
    where
        P: Fn(&KeyName<K>) -> bool,
    {
        Ok(self.keys()?.into_iter().filter(|n| predicate(n)).collect())
    }

    /// Decode every entry of the codec's kind whose key satisfies the
    /// predicate. Fails fast on the first error; no partial result is
    /// returned.
    fn get_all<C, P>(&self, codec: &C, predicate: P) -> StoreResult<Vec<C::Value>>
    where
        C: Codec,
        P: Fn(&KeyName<K>) -> bool,
    {
        let matched = self.match_keys(|n| n.kind() == codec.suffix() && predicate(n))?;
        let mut values = Vec::with_capacity(matched.len());
        for name in matched {
            let bytes = self.read_raw(&name)?;
            values.push(codec.decode(&bytes)?);
        }
        Ok(values)
    }

    /// As [`get_all`](Source::get_all), but returning lazy entries whose
    /// content decodes on first access.
    fn entries<C, P>(&self, codec: &C, predicate: P) -> StoreResult<Vec<Entry<K, C>>>
    where
        C: Codec + Clone,
        P: Fn(&KeyName<K>) -> bool,
    {
        let matched = self.match_keys(|n| n.kind() == codec.suffix() && predicate(n))?;
        let mut entries = Vec::with_capacity(matched.len());
        for name in matched {
            let bytes = self.read_raw(&name)?;
            entries.push(Entry::new(Key::from_parts(name, codec.clone()), bytes));
        }
        Ok(entries)
    }
}

/// Write access to a content store.
pub trait Sink<K: KeyId> {
    /// Write raw serialized bytes under a key, overwriting any existing
    /// entry.
    fn write_raw(&self, name: KeyName<K>, bytes: Vec<u8>) -> StoreResult<()>;

    /// Delete the entry for a key. Removing an absent key is a no-op.
    fn remove_raw(&self, name: &KeyName<K>) -> StoreResult<()>;

    /// Encode `value` with the key's codec and store it under `key`.
    ///
    /// The value's observable state at the moment of the call is what
    /// persists; later mutation of the in-memory value does not affect the
    /// stored bytes.
    fn put<C: Codec>(&self, key: &Key<K, C>, value: &C::Value) -> StoreResult<()> {
        let bytes = key.codec().encode(value)?;
        self.write_raw(key.name().clone(), bytes)
    }

    /// Remove the entry at `key` if present (idempotent).
    fn remove<C: Codec>(&self, key: &Key<K, C>) -> StoreResult<()> {
        self.remove_raw(key.name())
    }
}

/// A content store: unified read and write access over some medium, with
/// explicit synchronisation.
///
/// The core assumes no implicit locking: concurrent operations against the
/// same key are undefined unless a backend documents otherwise, and
/// `synchronise` is the designated visibility barrier.
pub trait ContentStore<K: KeyId>: Source<K> + Sink<K> {
    /// Flush buffered writes to the underlying medium, then invalidate any
    /// cached entries whose backing content may have changed externally.
    /// Invalidated entries are re-read on demand, not eagerly reloaded.
    ///
    /// On failure the store's visible state remains the last fully-flushed
    /// state.
    fn synchronise(&self) -> StoreResult<()>;

    /// The fingerprint of the entry stored under `name`.
    ///
    /// The default reads and hashes the serialized bytes; backends that
    /// track entries may serve a cached fingerprint for entries known to be
    /// unchanged since the last read.
    fn fingerprint(&self, name: &KeyName<K>) -> StoreResult<Fingerprint> {
        Ok(Fingerprint::of(&self.read_raw(name)?))
    }
}
