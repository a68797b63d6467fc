//! Error types for the block stores.

use thiserror::Error;
use unixdag_core::CoreError;

/// Errors raised by [`DagService`](crate::DagService) implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored block could not be decoded into a node.
    #[error(transparent)]
    Decode(#[from] CoreError),

    /// The database was written by a newer version of this crate.
    #[error("block database has schema version {found}, newest supported is {supported}")]
    SchemaTooNew { found: u32, supported: u32 },

    #[error("corrupt block database: {0}")]
    Corrupt(String),

    /// A writer panicked while holding the store lock.
    #[error("store lock poisoned")]
    LockPoisoned,

    #[error("blocking task failed: {0}")]
    Task(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
