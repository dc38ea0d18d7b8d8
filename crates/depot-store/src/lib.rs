//! Typed content storage for depot.
//!
//! This crate implements a heterogeneous, strongly-typed content store:
//! values of different types live side by side in one store, addressed by
//! keys that carry their codec. The store never inspects a content value's
//! runtime type; every read and write dispatches through the codec on the
//! key performing the operation.
//!
//! # Key Types
//!
//! - [`Codec`] -- decode/encode/suffix contract defining one content format
//! - [`Key`] / [`KeyName`] -- typed and erased key identity
//! - [`KeyMapping`] / [`SuffixMapping`] -- logical key to low-level path
//!   translation
//! - [`Source`] / [`Sink`] / [`ContentStore`] -- the store trait stack
//! - [`Entry`] -- lazily-decoded query result
//!
//! # Backends
//!
//! - [`MemoryStore`] -- `BTreeMap`-based store for tests and embedding
//! - [`DirectoryStore`] -- filesystem medium with buffered writes and
//!   `synchronise`-scoped cache invalidation
//!
//! # Design Rules
//!
//! 1. Codec dispatch is per-key; the store holds only serialized bytes.
//! 2. Matching operates over key metadata, never content bodies.
//! 3. Values are decoded fresh per read, so callers own what they get back.
//! 4. Absence is an error for `get`, a normal outcome for `remove` and for
//!    key-mapping `decode`.
//! 5. `synchronise` is the only visibility barrier; caches are scoped to
//!    the store instance and invalidated there.

pub mod codec;
pub mod codecs;
pub mod directory;
pub mod entry;
pub mod error;
pub mod key;
pub mod mapping;
pub mod memory;
pub mod traits;

pub use codec::Codec;
pub use codecs::{BincodeCodec, BytesCodec, JsonCodec, TextCodec};
pub use directory::DirectoryStore;
pub use entry::Entry;
pub use error::{StoreError, StoreResult};
pub use key::{Key, KeyId, KeyName};
pub use mapping::{KeyMapping, SuffixMapping};
pub use memory::MemoryStore;
pub use traits::{ContentStore, Sink, Source};
