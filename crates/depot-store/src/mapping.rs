use std::collections::BTreeSet;

use crate::codec::Codec;
use crate::key::{KeyId, KeyName};

/// Translation between logical keys and low-level storage identifiers.
///
/// `encode` must be deterministic so repeated writes target the same
/// physical location, and `decode(encode(k))` must yield `k` for any key a
/// conforming store produces. `decode` of an identifier the mapping does
/// not recognise returns `None`: such files are simply invisible to the
/// store, which lets a store share a medium with unrelated files.
pub trait KeyMapping<K: KeyId> {
    /// Encode a key into a low-level identifier (e.g. a relative path).
    fn encode(&self, name: &KeyName<K>) -> String;

    /// Decode a low-level identifier back into a key, or `None` if the
    /// identifier does not belong to this mapping.
    fn decode(&self, raw: &str) -> Option<KeyName<K>>;
}

/// Dotted-suffix file naming: `<id>.<suffix>`.
///
/// Only registered suffixes decode; everything else is invisible. The
/// registry also makes the one-suffix-per-content-kind constraint visible
/// at configuration time.
#[derive(Clone, Debug, Default)]
pub struct SuffixMapping {
    suffixes: BTreeSet<String>,
}

impl SuffixMapping {
    /// Create an empty mapping with no registered suffixes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration.
    pub fn with(mut self, suffix: impl Into<String>) -> Self {
        self.register(suffix);
        self
    }

    /// Register a suffix so that matching files decode to keys.
    pub fn register(&mut self, suffix: impl Into<String>) {
        self.suffixes.insert(suffix.into());
    }

    /// Register a codec's suffix.
    pub fn register_codec<C: Codec>(&mut self, codec: &C) {
        self.register(codec.suffix());
    }

    /// Returns `true` if the suffix is registered.
    pub fn recognises(&self, suffix: &str) -> bool {
        self.suffixes.contains(suffix)
    }
}

impl KeyMapping<String> for SuffixMapping {
    fn encode(&self, name: &KeyName<String>) -> String {
        format!("{}.{}", name.id(), name.kind())
    }

    fn decode(&self, raw: &str) -> Option<KeyName<String>> {
        let (stem, suffix) = raw.rsplit_once('.')?;
        if stem.is_empty() || !self.recognises(suffix) {
            return None;
        }
        Some(KeyName::new(stem.to_string(), suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> SuffixMapping {
        SuffixMapping::new().with("txt").with("point")
    }

    #[test]
    fn encode_then_decode_yields_equal_key() {
        let mapping = mapping();
        let name = KeyName::new("src/lib".to_string(), "txt");
        let raw = mapping.encode(&name);
        assert_eq!(raw, "src/lib.txt");
        assert_eq!(mapping.decode(&raw), Some(name));
    }

    #[test]
    fn encode_is_deterministic() {
        let mapping = mapping();
        let name = KeyName::new("x".to_string(), "point");
        assert_eq!(mapping.encode(&name), mapping.encode(&name));
    }

    #[test]
    fn unregistered_suffix_is_invisible() {
        assert_eq!(mapping().decode("notes.md"), None);
    }

    #[test]
    fn suffixless_identifier_is_invisible() {
        assert_eq!(mapping().decode("Makefile"), None);
        assert_eq!(mapping().decode(".txt"), None);
    }

    #[test]
    fn id_containing_dots_roundtrips() {
        let mapping = mapping();
        let name = KeyName::new("v1.2".to_string(), "txt");
        let raw = mapping.encode(&name);
        assert_eq!(raw, "v1.2.txt");
        assert_eq!(mapping.decode(&raw), Some(name));
    }
}
