//! Bundled codecs for common content kinds.
//!
//! Each codec is constructed with an explicit suffix so that two payload
//! types sharing a wire format (e.g. two JSON-encoded structs) still get
//! distinct content kinds.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::Codec;
use crate::error::{StoreError, StoreResult};

/// Raw byte content, stored verbatim.
#[derive(Clone, Copy, Debug)]
pub struct BytesCodec {
    suffix: &'static str,
}

impl BytesCodec {
    pub const fn new(suffix: &'static str) -> Self {
        Self { suffix }
    }
}

impl Codec for BytesCodec {
    type Value = Vec<u8>;

    fn decode(&self, bytes: &[u8]) -> StoreResult<Self::Value> {
        Ok(bytes.to_vec())
    }

    fn encode(&self, value: &Self::Value) -> StoreResult<Vec<u8>> {
        Ok(value.clone())
    }

    fn suffix(&self) -> &'static str {
        self.suffix
    }
}

/// UTF-8 text content.
#[derive(Clone, Copy, Debug)]
pub struct TextCodec {
    suffix: &'static str,
}

impl TextCodec {
    pub const fn new(suffix: &'static str) -> Self {
        Self { suffix }
    }
}

impl Codec for TextCodec {
    type Value = String;

    fn decode(&self, bytes: &[u8]) -> StoreResult<Self::Value> {
        String::from_utf8(bytes.to_vec()).map_err(|e| StoreError::Decode {
            kind: self.suffix.to_string(),
            reason: e.to_string(),
        })
    }

    fn encode(&self, value: &Self::Value) -> StoreResult<Vec<u8>> {
        Ok(value.clone().into_bytes())
    }

    fn suffix(&self) -> &'static str {
        self.suffix
    }
}

/// JSON-encoded serde payload.
pub struct JsonCodec<T> {
    suffix: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonCodec<T> {
    pub const fn new(suffix: &'static str) -> Self {
        Self {
            suffix,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for JsonCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for JsonCodec<T> {}

impl<T> fmt::Debug for JsonCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonCodec").field("suffix", &self.suffix).finish()
    }
}

impl<T: Serialize + DeserializeOwned> Codec for JsonCodec<T> {
    type Value = T;

    fn decode(&self, bytes: &[u8]) -> StoreResult<Self::Value> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::Decode {
            kind: self.suffix.to_string(),
            reason: e.to_string(),
        })
    }

    fn encode(&self, value: &Self::Value) -> StoreResult<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn suffix(&self) -> &'static str {
        self.suffix
    }
}

/// Bincode-encoded serde payload, for compact binary artifacts.
pub struct BincodeCodec<T> {
    suffix: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> BincodeCodec<T> {
    pub const fn new(suffix: &'static str) -> Self {
        Self {
            suffix,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for BincodeCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BincodeCodec<T> {}

impl<T> fmt::Debug for BincodeCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BincodeCodec").field("suffix", &self.suffix).finish()
    }
}

impl<T: Serialize + DeserializeOwned> Codec for BincodeCodec<T> {
    type Value = T;

    fn decode(&self, bytes: &[u8]) -> StoreResult<Self::Value> {
        bincode::deserialize(bytes).map_err(|e| StoreError::Decode {
            kind: self.suffix.to_string(),
            reason: e.to_string(),
        })
    }

    fn encode(&self, value: &Self::Value) -> StoreResult<Vec<u8>> {
        bincode::serialize(value).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn suffix(&self) -> &'static str {
        self.suffix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde::Deserialize;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    const POINT_JSON: JsonCodec<Point> = JsonCodec::new("point");
    const POINT_BIN: BincodeCodec<Point> = BincodeCodec::new("pbin");

    #[test]
    fn json_roundtrip() {
        let value = Point { x: 1, y: 2 };
        let bytes = POINT_JSON.encode(&value).unwrap();
        assert_eq!(POINT_JSON.decode(&bytes).unwrap(), value);
    }

    #[test]
    fn bincode_roundtrip() {
        let value = Point { x: -7, y: 40 };
        let bytes = POINT_BIN.encode(&value).unwrap();
        assert_eq!(POINT_BIN.decode(&bytes).unwrap(), value);
    }

    #[test]
    fn json_decode_rejects_malformed_input() {
        let err = POINT_JSON.decode(b"{\"x\": 1").unwrap_err();
        assert!(matches!(err, StoreError::Decode { ref kind, .. } if kind == "point"));
    }

    #[test]
    fn bincode_decode_rejects_truncated_input() {
        let value = Point { x: 3, y: 4 };
        let bytes = POINT_BIN.encode(&value).unwrap();
        assert!(POINT_BIN.decode(&bytes[..bytes.len() - 1]).is_err());
    }

    #[test]
    fn text_decode_rejects_invalid_utf8() {
        let codec = TextCodec::new("txt");
        let err = codec.decode(&[0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }

    #[test]
    fn suffixes_are_stable() {
        assert_eq!(POINT_JSON.suffix(), "point");
        assert_eq!(BytesCodec::new("raw").suffix(), "raw");
        assert_eq!(TextCodec::new("txt").suffix(), "txt");
    }

    proptest! {
        #[test]
        fn bytes_roundtrip_law(data: Vec<u8>) {
            let codec = BytesCodec::new("raw");
            let bytes = codec.encode(&data).unwrap();
            prop_assert_eq!(codec.decode(&bytes).unwrap(), data);
        }

        #[test]
        fn text_roundtrip_law(text: String) {
            let codec = TextCodec::new("txt");
            let bytes = codec.encode(&text).unwrap();
            prop_assert_eq!(codec.decode(&bytes).unwrap(), text);
        }

        #[test]
        fn json_roundtrip_law(x: i32, y: i32) {
            let value = Point { x, y };
            let bytes = POINT_JSON.encode(&value).unwrap();
            prop_assert_eq!(POINT_JSON.decode(&bytes).unwrap(), value);
        }

        #[test]
        fn bincode_roundtrip_law(x: i32, y: i32) {
            let value = Point { x, y };
            let bytes = POINT_BIN.encode(&value).unwrap();
            prop_assert_eq!(POINT_BIN.decode(&bytes).unwrap(), value);
        }
    }
}
