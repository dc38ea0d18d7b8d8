//! Versioned history for depot content stores.
//!
//! A [`Ledger`] wraps a content store with an append-only chain of
//! immutable [`Version`] snapshots. Each commit records the store's key set
//! and content fingerprints; diffing two versions compares fingerprints
//! only, which is what makes the ledger suitable for incremental build
//! tools: after a commit, a consumer recomputes only for the keys a
//! [`VersionDiff`] reports as added, removed, or changed.
//!
//! # Key Types
//!
//! - [`Ledger`] -- store wrapper owning the version arena
//! - [`Version`] -- one immutable key-to-fingerprint snapshot
//! - [`VersionDiff`] -- added/removed/changed key sets between versions

pub mod diff;
pub mod error;
pub mod ledger;
pub mod version;

pub use diff::{diff_versions, VersionDiff};
pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;
pub use version::Version;
