use std::collections::BTreeMap;

use depot_store::{KeyId, KeyName};
use depot_types::Fingerprint;
use serde::{Deserialize, Serialize};

/// One immutable snapshot in a ledger's history.
///
/// A version records the key set and content fingerprints of a store at
/// commit time. Once created its entry mapping never changes; the parent is
/// held as a sequence number into the ledger's version arena rather than a
/// reference, so versions share no ownership.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version<K: KeyId> {
    seq: u64,
    parent: Option<u64>,
    entries: BTreeMap<KeyName<K>, Fingerprint>,
}

impl<K: KeyId> Version<K> {
    pub(crate) fn new(
        seq: u64,
        parent: Option<u64>,
        entries: BTreeMap<KeyName<K>, Fingerprint>,
    ) -> Self {
        Self {
            seq,
            parent,
            entries,
        }
    }

    /// The sequence number of this version within its ledger.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The parent version's sequence number, or `None` for the genesis
    /// version.
    pub fn parent(&self) -> Option<u64> {
        self.parent
    }

    /// Number of entries captured by this snapshot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the snapshot captured no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the snapshot contains `name`.
    pub fn contains(&self, name: &KeyName<K>) -> bool {
        self.entries.contains_key(name)
    }

    /// The fingerprint recorded for `name`, if present.
    pub fn fingerprint(&self, name: &KeyName<K>) -> Option<&Fingerprint> {
        self.entries.get(name)
    }

    /// Keys captured by this snapshot, in `(id, kind)` order.
    pub fn keys(&self) -> impl Iterator<Item = &KeyName<K>> {
        self.entries.keys()
    }

    /// Key and fingerprint pairs, in `(id, kind)` order.
    pub fn iter(&self) -> impl Iterator<Item = (&KeyName<K>, &Fingerprint)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(id: &str) -> KeyName<String> {
        KeyName::new(id.to_string(), "txt")
    }

    fn version(seq: u64, parent: Option<u64>, ids: &[&str]) -> Version<String> {
        let entries = ids
            .iter()
            .map(|id| (name(id), Fingerprint::of(id.as_bytes())))
            .collect();
        Version::new(seq, parent, entries)
    }

    #[test]
    fn genesis_has_no_parent() {
        let v = version(0, None, &[]);
        assert_eq!(v.seq(), 0);
        assert_eq!(v.parent(), None);
        assert!(v.is_empty());
    }

    #[test]
    fn lookup_by_name() {
        let v = version(1, Some(0), &["a", "b"]);
        assert_eq!(v.len(), 2);
        assert!(v.contains(&name("a")));
        assert!(!v.contains(&name("c")));
        assert_eq!(
            v.fingerprint(&name("b")),
            Some(&Fingerprint::of(b"b"))
        );
    }

    #[test]
    fn keys_iterate_in_order() {
        let v = version(1, Some(0), &["c", "a", "b"]);
        let ids: Vec<&str> = v.keys().map(|n| n.id().as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
