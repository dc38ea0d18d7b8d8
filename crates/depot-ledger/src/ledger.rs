use std::collections::BTreeMap;

use depot_store::{ContentStore, KeyId};

use crate::diff::{diff_versions, VersionDiff};
use crate::error::{LedgerError, LedgerResult};
use crate::version::Version;

/// An append-only history of store snapshots.
///
/// The ledger owns its store and keeps every committed [`Version`] in an
/// arena indexed by sequence number; the genesis version (seq 0, empty, no
/// parent) is created up front. Committing is the only transition: it
/// snapshots the store's current key set and fingerprints as a child of
/// the head, and never mutates or removes existing versions.
///
/// `commit` takes `&mut self` while store writes go through
/// [`store`](Ledger::store), so commits are statically serialized against
/// writes performed through the ledger, and the snapshot reflects a single
/// point in time.
pub struct Ledger<K: KeyId, S> {
    store: S,
    versions: Vec<Version<K>>,
}

impl<K: KeyId, S: ContentStore<K>> Ledger<K, S> {
    /// Create a ledger over `store` with an empty genesis version.
    pub fn new(store: S) -> Self {
        Self {
            store,
            versions: vec![Version::new(0, None, BTreeMap::new())],
        }
    }

    /// The underlying store. All reads and writes go through here.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the ledger, releasing the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// The most recently committed version.
    pub fn head(&self) -> &Version<K> {
        self.versions.last().expect("ledger always has genesis")
    }

    /// Sequence number of the head version.
    pub fn head_seq(&self) -> u64 {
        self.head().seq()
    }

    /// Number of versions in the history, genesis included.
    pub fn version_count(&self) -> usize {
        self.versions.len()
    }

    /// Look up a version by sequence number.
    pub fn version(&self, seq: u64) -> LedgerResult<&Version<K>> {
        usize::try_from(seq)
            .ok()
            .and_then(|i| self.versions.get(i))
            .ok_or(LedgerError::UnknownVersion(seq))
    }

    /// All versions, oldest first.
    pub fn versions(&self) -> impl Iterator<Item = &Version<K>> {
        self.versions.iter()
    }

    /// Snapshot the store's current state as a new head version.
    ///
    /// Fingerprints come from [`ContentStore::fingerprint`], so a backend
    /// that tracks unchanged entries serves them from cache instead of
    /// re-reading. Commit is atomic: if any entry cannot be fingerprinted,
    /// no version is created and history is unchanged.
    pub fn commit(&mut self) -> LedgerResult<&Version<K>> {
        let mut entries = BTreeMap::new();
        for name in self.store.keys()? {
            let fingerprint = self.store.fingerprint(&name)?;
            entries.insert(name, fingerprint);
        }

        let seq = self.versions.len() as u64;
        let parent = Some(self.head_seq());
        tracing::debug!(seq, entries = entries.len(), "committed version");
        self.versions.push(Version::new(seq, parent, entries));
        Ok(self.head())
    }

    /// The change set between two committed versions.
    ///
    /// Pure in-memory fingerprint comparison; fails only if a sequence
    /// number does not name a version.
    pub fn diff(&self, from: u64, to: u64) -> LedgerResult<VersionDiff<K>> {
        Ok(diff_versions(self.version(from)?, self.version(to)?))
    }

    /// The change set between a past version and the head.
    pub fn changes_since(&self, seq: u64) -> LedgerResult<VersionDiff<K>> {
        self.diff(seq, self.head_seq())
    }
}

impl<K: KeyId, S: std::fmt::Debug> std::fmt::Debug for Ledger<K, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("store", &self.store)
            .field("versions", &self.versions.len())
            .finish()
    }
}
