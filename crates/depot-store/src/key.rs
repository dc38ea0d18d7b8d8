use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::codec::Codec;
use crate::error::{StoreError, StoreResult};

/// Bound for key identifiers: opaque, comparable, printable values.
///
/// `is_valid` rejects identifiers that cannot address an entry; the default
/// accepts everything, string implementations reject the empty string.
pub trait KeyId: Clone + Eq + Ord + Hash + fmt::Display {
    fn is_valid(&self) -> bool {
        true
    }
}

impl KeyId for String {
    fn is_valid(&self) -> bool {
        !self.is_empty()
    }
}

impl KeyId for &'static str {
    fn is_valid(&self) -> bool {
        !self.is_empty()
    }
}

impl KeyId for u64 {}

/// Erased key identity: identifier plus content kind tag.
///
/// This is the uniform representation used by predicates, key mappings, and
/// ledger snapshots, where entries of different content kinds mix. The kind
/// tag is the owning codec's suffix.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeyName<K> {
    id: K,
    kind: String,
}

impl<K: KeyId> KeyName<K> {
    pub fn new(id: K, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
        }
    }

    pub fn id(&self) -> &K {
        &self.id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }
}

impl<K: KeyId> fmt::Display for KeyName<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.id, self.kind)
    }
}

/// A typed key: identifier paired with the codec for its content.
///
/// Equality and hashing are defined over `(id, kind)` only, so two keys with
/// the same identifier and suffix are equal regardless of codec instance.
/// Keys are immutable value objects; construction is the only fallible step.
pub struct Key<K, C> {
    name: KeyName<K>,
    codec: C,
}

impl<K: KeyId, C: Codec> Key<K, C> {
    /// Build a key from an identifier and codec.
    ///
    /// Fails with [`StoreError::InvalidKey`] for an invalid identifier or a
    /// codec with an empty suffix.
    pub fn new(id: K, codec: C) -> StoreResult<Self> {
        if !id.is_valid() {
            return Err(StoreError::InvalidKey(format!(
                "identifier {id:?} cannot address an entry",
                id = id.to_string()
            )));
        }
        if codec.suffix().is_empty() {
            return Err(StoreError::InvalidKey(
                "codec suffix must not be empty".to_string(),
            ));
        }
        let name = KeyName::new(id, codec.suffix());
        Ok(Self { name, codec })
    }

    /// Pair an already-validated name with its codec. The name's kind must
    /// be the codec's suffix.
    pub(crate) fn from_parts(name: KeyName<K>, codec: C) -> Self {
        debug_assert_eq!(name.kind(), codec.suffix());
        Self { name, codec }
    }

    pub fn id(&self) -> &K {
        self.name.id()
    }

    pub fn kind(&self) -> &str {
        self.name.kind()
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn name(&self) -> &KeyName<K> {
        &self.name
    }

    pub fn into_name(self) -> KeyName<K> {
        self.name
    }
}

impl<K: KeyId, C> PartialEq for Key<K, C> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<K: KeyId, C> Eq for Key<K, C> {}

impl<K: KeyId, C> Hash for Key<K, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl<K: KeyId, C> fmt::Debug for Key<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("id", &self.name.id().to_string())
            .field("kind", &self.name.kind())
            .finish()
    }
}

impl<K: KeyId, C> fmt::Display for Key<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
