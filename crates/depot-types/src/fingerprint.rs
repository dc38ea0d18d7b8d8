use std::fmt;

use serde::{Deserialize, Serialize};

use crate::digest::Digest;

/// Content fingerprint: digest plus serialized size.
///
/// Two entries with equal fingerprints are treated as unchanged. The size is
/// redundant with the digest for correctness but lets mismatches be rejected
/// without hashing in the common case where lengths already differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    digest: Digest,
    size: u64,
}

impl Fingerprint {
    /// Fingerprint a byte buffer.
    pub fn of(data: &[u8]) -> Self {
        Self {
            digest: Digest::of(data),
            size: data.len() as u64,
        }
    }

    /// Build from an already-computed digest and size.
    pub fn new(digest: Digest, size: u64) -> Self {
        Self { digest, size }
    }

    /// The content digest.
    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    /// The content size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.digest.short_hex(), self.size)
    }
}
