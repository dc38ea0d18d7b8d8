use crate::error::StoreResult;

/// Binary format for one kind of stored content.
///
/// A codec is the only place a content type's byte layout is defined. The
/// store never interprets content bodies; it obtains the codec from the key
/// used in each operation and delegates all (de)serialization to it.
///
/// Implementations must satisfy these invariants:
/// - Round-trip: `decode(encode(v))` equals `v` for every valid `v`.
/// - `decode` consumes the full buffer written by `encode` and fails on
///   truncated or malformed input without leaving partial state behind.
/// - `suffix` is non-empty, deterministic, and stable across process runs;
///   it doubles as the content kind tag in key identity and low-level
///   naming, so it must be unique among the codecs used with one store.
pub trait Codec {
    /// The in-memory content type this codec reads and writes.
    type Value;

    /// Decode a full byte buffer into a value.
    ///
    /// Fails with [`StoreError::Decode`](crate::StoreError::Decode) when the
    /// bytes are not valid for this format.
    fn decode(&self, bytes: &[u8]) -> StoreResult<Self::Value>;

    /// Encode a value into the byte form `decode` accepts.
    fn encode(&self, value: &Self::Value) -> StoreResult<Vec<u8>>;

    /// The stable suffix identifying this content kind (e.g. `"json"`).
    fn suffix(&self) -> &'static str;
}
