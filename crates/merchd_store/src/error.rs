//! Error types for store operations.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store did not answer the reachability check.
    #[error("store unreachable: {0}")]
    Unreachable(String),

    /// The underlying SQLite engine reported an error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl StoreError {
    /// Returns true if the store could not be reached at all, as opposed
    /// to a statement failing against a reachable store.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, StoreError::Unreachable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_classification() {
        assert!(StoreError::Unreachable("node down".into()).is_unreachable());
        assert!(!StoreError::Sqlite(rusqlite::Error::InvalidQuery).is_unreachable());
    }
}
