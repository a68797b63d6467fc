//! In-memory block store, for tests and throwaway imports.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;
use unixdag_core::Cid;

use crate::error::{Result, StoreError};
use crate::traits::{DagService, InsertResult};

/// Blocks in a `HashMap` behind a `RwLock`. Nothing outlives the store.
pub struct MemoryDagStore {
    blocks: RwLock<HashMap<Cid, Bytes>>,
}

impl MemoryDagStore {
    pub fn new() -> Self {
        Self {
            blocks: RwLock::new(HashMap::new()),
        }
    }

    /// All stored CIDs, in no particular order.
    pub fn cids(&self) -> Result<Vec<Cid>> {
        let blocks = self.blocks.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(blocks.keys().copied().collect())
    }
}

impl Default for MemoryDagStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DagService for MemoryDagStore {
    async fn insert_block(&self, cid: &Cid, data: &[u8]) -> Result<InsertResult> {
        let mut blocks = self.blocks.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(match blocks.entry(*cid) {
            Entry::Occupied(_) => InsertResult::AlreadyExists,
            Entry::Vacant(slot) => {
                slot.insert(Bytes::copy_from_slice(data));
                InsertResult::Inserted
            }
        })
    }

    async fn get_block(&self, cid: &Cid) -> Result<Option<Bytes>> {
        let blocks = self.blocks.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(blocks.get(cid).cloned())
    }

    async fn has_block(&self, cid: &Cid) -> Result<bool> {
        let blocks = self.blocks.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(blocks.contains_key(cid))
    }

    async fn block_count(&self) -> Result<u64> {
        let blocks = self.blocks.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(blocks.len() as u64)
    }
}
