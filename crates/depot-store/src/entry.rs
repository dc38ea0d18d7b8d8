use once_cell::unsync::OnceCell;

use crate::codec::Codec;
use crate::error::StoreResult;
use crate::key::{Key, KeyId};

/// A query result pairing a key with lazily-decoded content.
///
/// The raw bytes are captured when the entry is produced; decoding happens
/// on the first `content` call and is memoized, so each entry decodes at
/// most once. Entries are produced only by query operations
/// ([`Source::entries`](crate::Source::entries)).
pub struct Entry<K: KeyId, C: Codec> {
    key: Key<K, C>,
    bytes: Vec<u8>,
    decoded: OnceCell<C::Value>,
}

impl<K: KeyId, C: Codec> Entry<K, C> {
    pub(crate) fn new(key: Key<K, C>, bytes: Vec<u8>) -> Self {
        Self {
            key,
            bytes,
            decoded: OnceCell::new(),
        }
    }

    /// The identifying key for this entry.
    pub fn key(&self) -> &Key<K, C> {
        &self.key
    }

    /// The raw serialized bytes, as captured at query time.
    pub fn raw(&self) -> &[u8] {
        &self.bytes
    }

    /// Decode and return the content, decoding at most once.
    pub fn content(&self) -> StoreResult<&C::Value> {
        self.decoded
            .get_or_try_init(|| self.key.codec().decode(&self.bytes))
    }

    /// Consume the entry, returning owned content.
    pub fn into_content(self) -> StoreResult<C::Value> {
        match self.decoded.into_inner() {
            Some(value) => Ok(value),
            None => self.key.codec().decode(&self.bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use std::cell::Cell;

    /// Codec that counts decode calls, for memoization checks.
    #[derive(Clone)]
    struct CountingCodec<'a> {
        calls: &'a Cell<u32>,
    }

    impl Codec for CountingCodec<'_> {
        type Value = String;

        fn decode(&self, bytes: &[u8]) -> StoreResult<String> {
            self.calls.set(self.calls.get() + 1);
            String::from_utf8(bytes.to_vec()).map_err(|e| StoreError::Decode {
                kind: self.suffix().to_string(),
                reason: e.to_string(),
            })
        }

        fn encode(&self, value: &String) -> StoreResult<Vec<u8>> {
            Ok(value.clone().into_bytes())
        }

        fn suffix(&self) -> &'static str {
            "txt"
        }
    }

    #[test]
    fn content_decodes_at_most_once() {
        let calls = Cell::new(0);
        let codec = CountingCodec { calls: &calls };
        let key = Key::new("x".to_string(), codec).unwrap();
        let entry = Entry::new(key, b"hello".to_vec());

        assert_eq!(entry.content().unwrap(), "hello");
        assert_eq!(entry.content().unwrap(), "hello");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn into_content_reuses_memoized_value() {
        let calls = Cell::new(0);
        let codec = CountingCodec { calls: &calls };
        let key = Key::new("x".to_string(), codec).unwrap();
        let entry = Entry::new(key, b"hello".to_vec());

        entry.content().unwrap();
        assert_eq!(entry.into_content().unwrap(), "hello");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn decode_failure_surfaces() {
        let calls = Cell::new(0);
        let codec = CountingCodec { calls: &calls };
        let key = Key::new("x".to_string(), codec).unwrap();
        let entry = Entry::new(key, vec![0xff, 0xfe]);

        assert!(entry.content().is_err());
    }
}
