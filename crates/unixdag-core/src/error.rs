//! Error types for unixdag core.

use thiserror::Error;

/// Core errors that can occur while building, encoding or decoding nodes.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown CID version: {0}")]
    UnsupportedCidVersion(u64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("multihash error: {0}")]
    Multihash(String),

    #[error("cid error: {0}")]
    Cid(String),

    #[error("unsupported codec: {0:#x}")]
    UnsupportedCodec(u64),

    #[error("block of {size} bytes exceeds the {limit} byte limit")]
    BlockTooLarge { size: usize, limit: usize },

    #[error("malformed dag-pb node: {0}")]
    MalformedNode(String),

    #[error("decoding error: {0}")]
    Decode(String),
}

impl From<prost::DecodeError> for CoreError {
    fn from(e: prost::DecodeError) -> Self {
        CoreError::Decode(e.to_string())
    }
}

impl From<libipld::cid::Error> for CoreError {
    fn from(e: libipld::cid::Error) -> Self {
        CoreError::Cid(e.to_string())
    }
}

impl From<libipld::multihash::Error> for CoreError {
    fn from(e: libipld::multihash::Error) -> Self {
        CoreError::Multihash(e.to_string())
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
