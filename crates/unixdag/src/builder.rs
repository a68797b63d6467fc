//! The DAG builder shared by layouts.
//!
//! [`DagBuilder`] owns the splitter, the CID policy and the storage handle.
//! It hands out leaves one chunk at a time and persists every node attached
//! to a parent. [`FileNode`] is a UnixFS file parent under construction.

use unixdag_core::{
    CidBuilder, CoreError, DagNode, DataType, FsNode, Link, ProtoNode, RawNode, BLOCK_SIZE_LIMIT,
};
use unixdag_store::{DagService, DagServiceExt};

use crate::chunker::Splitter;
use crate::config::ImportConfig;
use crate::error::ImportError;

/// Counters collected during an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Leaves built.
    pub leaves: u64,
    /// Nodes handed to the storage service, inlined ones included.
    pub nodes: u64,
    /// Of those, nodes embedded in their CID and never written.
    pub inlined: u64,
    /// Bytes consumed from the input stream.
    pub bytes: u64,
}

/// A UnixFS file node with its links, not yet encoded.
#[derive(Debug, Clone)]
pub struct FileNode {
    fs: FsNode,
    links: Vec<Link>,
}

impl FileNode {
    pub fn new() -> Self {
        Self {
            fs: FsNode::new(DataType::File),
            links: Vec::new(),
        }
    }

    pub fn num_children(&self) -> usize {
        self.links.len()
    }

    /// File size covered by this node so far.
    pub fn file_size(&self) -> u64 {
        self.fs.file_size()
    }

    fn push(&mut self, child: &DagNode, file_size: u64) {
        self.links.push(Link::new("", child.size(), *child.cid()));
        self.fs.add_block_size(file_size);
    }

    /// Encode into a dag-pb node.
    pub fn commit(self, cid_builder: &CidBuilder) -> Result<DagNode, CoreError> {
        let node = ProtoNode::new(Some(self.fs.to_bytes()), self.links, cid_builder)?;
        Ok(node.into())
    }
}

impl Default for FileNode {
    fn default() -> Self {
        Self::new()
    }
}

/// Produces leaves from a splitter and persists nodes into a DAG service.
///
/// Keeps exactly one chunk of lookahead so that layouts can ask whether the
/// input is exhausted before deciding to open another parent.
pub struct DagBuilder<'a, D: ?Sized, S> {
    splitter: S,
    dag: &'a D,
    cid_builder: CidBuilder,
    max_links: usize,
    raw_leaves: bool,
    next: Option<Vec<u8>>,
    primed: bool,
    stats: ImportStats,
}

impl<'a, D, S> DagBuilder<'a, D, S>
where
    D: DagService + ?Sized,
    S: Splitter,
{
    /// Set up a builder. Fails on an invalid configuration without touching
    /// the splitter or the DAG service.
    pub fn new(splitter: S, dag: &'a D, config: &ImportConfig) -> Result<Self, ImportError> {
        let cid_builder = config.cid_builder().map_err(ImportError::Config)?;
        Ok(Self {
            splitter,
            dag,
            cid_builder,
            max_links: config.max_links,
            raw_leaves: config.raw_leaves,
            next: None,
            primed: false,
            stats: ImportStats::default(),
        })
    }

    pub fn max_links(&self) -> usize {
        self.max_links
    }

    pub fn cid_builder(&self) -> &CidBuilder {
        &self.cid_builder
    }

    pub fn stats(&self) -> ImportStats {
        self.stats
    }

    async fn prime(&mut self) -> std::io::Result<()> {
        if !self.primed {
            self.next = self.splitter.next_bytes().await?;
            self.primed = true;
        }
        Ok(())
    }

    /// Whether the input is exhausted. Reads ahead one chunk if needed.
    pub async fn is_done(&mut self) -> Result<bool, ImportError> {
        self.prime().await?;
        Ok(self.next.is_none())
    }

    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, ImportError> {
        self.prime().await?;
        self.primed = false;
        Ok(self.next.take())
    }

    /// Build a leaf around `data`, either raw or as a UnixFS file node.
    pub fn new_leaf_node(&self, data: Vec<u8>) -> Result<DagNode, CoreError> {
        if data.len() > BLOCK_SIZE_LIMIT {
            return Err(CoreError::BlockTooLarge {
                size: data.len(),
                limit: BLOCK_SIZE_LIMIT,
            });
        }

        if self.raw_leaves {
            return Ok(RawNode::new(data, &self.cid_builder)?.into());
        }

        let mut fs = FsNode::new(DataType::File);
        fs.set_data(data);
        Ok(ProtoNode::new(Some(fs.to_bytes()), Vec::new(), &self.cid_builder)?.into())
    }

    /// Build a leaf from the next chunk. Returns the leaf and the number of
    /// file bytes it holds.
    pub async fn new_leaf_data_node(&mut self) -> Result<(DagNode, u64), ImportError> {
        let data = self.next_chunk().await?.unwrap_or_default();
        let len = data.len() as u64;
        let leaf = self.new_leaf_node(data)?;
        self.stats.leaves += 1;
        self.stats.bytes += len;
        Ok((leaf, len))
    }

    /// Persist a node into the DAG service.
    pub async fn add(&mut self, node: &DagNode) -> Result<(), ImportError> {
        self.dag.persist(node).await?;
        self.stats.nodes += 1;
        if node.is_inlined() {
            self.stats.inlined += 1;
        }
        Ok(())
    }

    /// Link `child` under `parent` and persist the child.
    pub async fn add_child(
        &mut self,
        parent: &mut FileNode,
        child: DagNode,
        file_size: u64,
    ) -> Result<(), ImportError> {
        parent.push(&child, file_size);
        self.add(&child).await
    }

    /// Encode a finished parent with this builder's CID policy.
    pub fn commit(&self, node: FileNode) -> Result<DagNode, ImportError> {
        Ok(node.commit(&self.cid_builder)?)
    }
}
