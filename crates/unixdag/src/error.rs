//! Error types for the importer, the extractor and the file reader.

use thiserror::Error;
use unixdag_core::{Cid, CoreError, DataType};
use unixdag_store::StoreError;

/// Errors produced while importing a byte stream.
///
/// Every variant wraps the underlying failure unmodified.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The import configuration was rejected before anything was read.
    #[error(transparent)]
    Config(CoreError),

    /// Building or encoding a node failed.
    #[error(transparent)]
    Node(#[from] CoreError),

    /// Reading the input stream failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The storage service rejected a write.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ImportError {
    /// Whether the import failed before any input was consumed.
    pub fn is_config(&self) -> bool {
        matches!(self, ImportError::Config(_))
    }
}

/// Errors produced by [`try_extract_fs_node`](crate::try_extract_fs_node).
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The node is a raw leaf and carries no UnixFS framing.
    ///
    /// Callers that know the node is a raw leaf can use its byte length as
    /// its file size.
    #[error("unsupported node type while extracting unixfs node: raw leaf {cid} carries no unixfs framing")]
    RawLeaf { cid: Cid },

    /// The data section of a dag-pb node is not valid UnixFS.
    #[error(transparent)]
    Decode(#[from] CoreError),
}

/// Errors produced while reading file content back out of a DAG.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("block not found: {0}")]
    MissingBlock(Cid),

    #[error("{cid} is not a file (unixfs type {data_type:?})")]
    NotAFile { cid: Cid, data_type: DataType },

    #[error(transparent)]
    Decode(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
