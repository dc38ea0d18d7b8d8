use depot_store::StoreError;

/// Errors from ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// No version exists with the given sequence number.
    #[error("unknown version {0}")]
    UnknownVersion(u64),

    /// The underlying store failed while collecting fingerprints.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
