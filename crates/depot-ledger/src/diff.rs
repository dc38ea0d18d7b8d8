use std::collections::BTreeSet;

use depot_store::{KeyId, KeyName};
use serde::{Deserialize, Serialize};

use crate::version::Version;

/// The key-level change set between two versions.
///
/// The three sets are pairwise disjoint; a key whose fingerprint is equal
/// in both versions appears in none of them. An incremental consumer only
/// needs to recompute for the keys in [`touched`](VersionDiff::touched).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDiff<K: KeyId> {
    /// Keys present only in the newer version.
    pub added: BTreeSet<KeyName<K>>,
    /// Keys present only in the older version.
    pub removed: BTreeSet<KeyName<K>>,
    /// Keys present in both versions with differing fingerprints.
    pub changed: BTreeSet<KeyName<K>>,
}

impl<K: KeyId> Default for VersionDiff<K> {
    fn default() -> Self {
        Self {
            added: BTreeSet::new(),
            removed: BTreeSet::new(),
            changed: BTreeSet::new(),
        }
    }
}

impl<K: KeyId> VersionDiff<K> {
    /// Returns `true` if nothing was added, removed, or changed.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Total number of affected keys.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }

    /// Every affected key: the recomputation set for incremental callers.
    pub fn touched(&self) -> impl Iterator<Item = &KeyName<K>> {
        self.added
            .iter()
            .chain(self.removed.iter())
            .chain(self.changed.iter())
    }
}

/// Compute the change set between two versions.
///
/// Pure fingerprint comparison; content bodies are never read. Keys only in
/// `new` are added, keys only in `old` are removed, and keys in both with
/// differing fingerprints are changed.
pub fn diff_versions<K: KeyId>(old: &Version<K>, new: &Version<K>) -> VersionDiff<K> {
    let mut diff = VersionDiff::default();

    for (name, old_fp) in old.iter() {
        match new.fingerprint(name) {
            Some(new_fp) => {
                if old_fp != new_fp {
                    diff.changed.insert(name.clone());
                }
            }
            None => {
                diff.removed.insert(name.clone());
            }
        }
    }

    for name in new.keys() {
        if !old.contains(name) {
            diff.added.insert(name.clone());
        }
    }

    diff
}
