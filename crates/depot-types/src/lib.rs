//! Foundation types for depot.
//!
//! This crate provides the content-hashing types used throughout the depot
//! system. Every other depot crate depends on `depot-types`.
//!
//! # Key Types
//!
//! - [`Digest`] -- BLAKE3 content hash of an entry's serialized bytes
//! - [`Fingerprint`] -- digest + size pair used to detect change between
//!   builds without comparing content bodies

pub mod digest;
pub mod error;
pub mod fingerprint;

pub use digest::Digest;
pub use error::TypeError;
pub use fingerprint::Fingerprint;
