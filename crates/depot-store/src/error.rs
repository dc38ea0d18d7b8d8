/// Errors from content store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A key could not be constructed from the given parts.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// No entry exists for the requested key.
    #[error("no entry for key {0}")]
    NotFound(String),

    /// Stored bytes do not match the declared content kind.
    #[error("decode failed for {kind} content: {reason}")]
    Decode { kind: String, reason: String },

    /// A value could not be encoded for storage.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying medium.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Returns `true` for the absent-entry case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
