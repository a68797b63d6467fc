//! Import configuration.
//!
//! Every parameter the importer uses lives here; there is no process-wide
//! mutable state. The defaults reproduce the standard UnixFS import profile:
//! 1 MiB chunks, 1024 links per node, raw leaves, CIDv1, SHA2-256 and
//! inlining of nodes up to 32 bytes.

use serde::{Deserialize, Serialize};
use unixdag_core::{CidBuilder, CoreError, HashFunction, Prefix, BLOCK_SIZE_LIMIT};

/// Default size of each chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Default maximum number of links per node.
pub const DEFAULT_MAX_LINKS: usize = 1024;

/// Default inlining threshold in bytes.
pub const DEFAULT_INLINE_LIMIT: usize = 32;

/// Largest inlining threshold: identity digests are capped at 64 bytes.
pub const MAX_INLINE_LIMIT: usize = 64;

/// Default CID version.
pub const DEFAULT_CID_VERSION: u64 = 1;

/// Parameters for [`Importer`](crate::Importer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Fixed chunk size of the splitter.
    pub chunk_size: usize,

    /// Maximum number of links in any node.
    pub max_links: usize,

    /// Emit leaves as raw nodes instead of UnixFS file nodes.
    pub raw_leaves: bool,

    /// CID version of every non-inlined node.
    pub cid_version: u64,

    /// Hash function of every non-inlined node.
    pub hash_function: HashFunction,

    /// Serialized nodes up to this many bytes are embedded in their CID.
    /// `None` disables inlining.
    pub inline_limit: Option<usize>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_links: DEFAULT_MAX_LINKS,
            raw_leaves: true,
            cid_version: DEFAULT_CID_VERSION,
            hash_function: HashFunction::default(),
            inline_limit: Some(DEFAULT_INLINE_LIMIT),
        }
    }
}

impl ImportConfig {
    /// Check the configuration for values no import could honour.
    pub fn validate(&self) -> Result<(), CoreError> {
        Prefix::for_cid_version(self.cid_version)?;

        if self.chunk_size == 0 || self.chunk_size > BLOCK_SIZE_LIMIT {
            return Err(CoreError::InvalidConfig(format!(
                "chunk size must be between 1 and {} bytes, got {}",
                BLOCK_SIZE_LIMIT, self.chunk_size
            )));
        }

        if self.max_links < 2 {
            return Err(CoreError::InvalidConfig(format!(
                "max links must be at least 2, got {}",
                self.max_links
            )));
        }

        if let Some(limit) = self.inline_limit {
            if limit > MAX_INLINE_LIMIT {
                return Err(CoreError::InvalidConfig(format!(
                    "inline limit must be at most {} bytes, got {}",
                    MAX_INLINE_LIMIT, limit
                )));
            }
        }

        // CIDv0 can only name SHA2-256 dag-pb blocks.
        if self.cid_version == 0 {
            if self.raw_leaves {
                return Err(CoreError::InvalidConfig(
                    "raw leaves require CID version 1".into(),
                ));
            }
            if self.hash_function != HashFunction::Sha2_256 {
                return Err(CoreError::InvalidConfig(format!(
                    "hash function {} requires CID version 1",
                    self.hash_function
                )));
            }
            if self.inline_limit.is_some() {
                return Err(CoreError::InvalidConfig(
                    "inlining requires CID version 1".into(),
                ));
            }
        }

        Ok(())
    }

    /// The CID builder every node of an import is identified with.
    pub fn cid_builder(&self) -> Result<CidBuilder, CoreError> {
        self.validate()?;
        let prefix = Prefix::for_cid_version(self.cid_version)?.with_hash(self.hash_function);
        Ok(match self.inline_limit {
            Some(limit) => CidBuilder::inline(prefix, limit),
            None => CidBuilder::new(prefix),
        })
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json).map_err(|e| CoreError::InvalidConfig(e.to_string()))
    }
}
