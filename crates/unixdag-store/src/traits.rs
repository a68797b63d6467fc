//! DagService trait: the abstract interface for block persistence.
//!
//! Blocks are addressed by CID. Writing the same block twice is idempotent,
//! and blocks are never removed through this interface.

use async_trait::async_trait;
use bytes::Bytes;
use unixdag_core::{is_inlined, Cid, DagNode};

use crate::error::Result;

/// Result of inserting a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    /// Block was written.
    Inserted,
    /// Block already present (idempotent - not an error).
    AlreadyExists,
}

/// Async interface for block persistence.
///
/// Implementations must be safe to share between concurrent imports; writes
/// of identical content under the same CID must not conflict.
#[async_trait]
pub trait DagService: Send + Sync {
    /// Store the encoded bytes of a node under its CID.
    async fn insert_block(&self, cid: &Cid, data: &[u8]) -> Result<InsertResult>;

    /// Fetch a block by CID.
    async fn get_block(&self, cid: &Cid) -> Result<Option<Bytes>>;

    /// Check whether a block is stored.
    async fn has_block(&self, cid: &Cid) -> Result<bool>;

    /// Number of stored blocks.
    async fn block_count(&self) -> Result<u64>;
}

/// Node-level helpers on top of [`DagService`].
pub trait DagServiceExt: DagService {
    /// Persist a node and return its CID.
    ///
    /// Nodes whose CID inlines their content are not written; the CID alone
    /// resolves them.
    fn persist(&self, node: &DagNode) -> impl std::future::Future<Output = Result<Cid>> + Send;

    /// Load and decode a node.
    fn get_node(&self, cid: &Cid)
        -> impl std::future::Future<Output = Result<Option<DagNode>>> + Send;
}

impl<S: DagService + ?Sized> DagServiceExt for S {
    async fn persist(&self, node: &DagNode) -> Result<Cid> {
        let cid = *node.cid();
        if is_inlined(&cid) {
            tracing::trace!(%cid, "skipping inlined node");
            return Ok(cid);
        }

        let result = self.insert_block(&cid, node.raw_data()).await?;
        tracing::trace!(%cid, ?result, len = node.raw_data().len(), "persisted node");
        Ok(cid)
    }

    async fn get_node(&self, cid: &Cid) -> Result<Option<DagNode>> {
        if let Some(node) = DagNode::from_inlined(cid)? {
            return Ok(Some(node));
        }

        match self.get_block(cid).await? {
            Some(bytes) => Ok(Some(DagNode::decode(*cid, bytes)?)),
            None => Ok(None),
        }
    }
}
