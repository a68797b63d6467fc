//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::future::Future;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tempfile::TempDir;
use unixdag::{import_file, ImportConfig, Importer};
use unixdag_core::{Cid, DagNode, FsNode};
use unixdag_store::{DagService, DagServiceExt, MemoryDagStore, SqliteDagStore};

/// Run a future to completion on a fresh current-thread runtime.
///
/// For use inside synchronous test harnesses such as `proptest!`.
pub fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build test runtime")
        .block_on(future)
}

/// Deterministic pseudo-random test content.
///
/// Different seeds give different content; the same seed always gives the
/// same bytes.
pub fn patterned_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut bytes = vec![0u8; len];
    rng.fill_bytes(&mut bytes);
    bytes
}

/// Shape of an imported DAG.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DagStats {
    /// Node positions in the tree, counting repeated content once per link.
    pub nodes: usize,
    /// Nodes without links.
    pub leaves: usize,
    /// Largest number of links on any node.
    pub max_links: usize,
    /// Levels from root to the deepest leaf; a lone leaf has depth 1.
    pub depth: usize,
    /// Sum of leaf payload bytes.
    pub leaf_bytes: u64,
}

/// Walk the tree under `root` depth-first, in link order.
pub async fn walk<D: DagService + ?Sized>(dag: &D, root: &Cid) -> Vec<(usize, DagNode)> {
    let mut stack = vec![(1usize, *root)];
    let mut nodes = Vec::new();
    while let Some((depth, cid)) = stack.pop() {
        let node = dag
            .get_node(&cid)
            .await
            .expect("store error during walk")
            .unwrap_or_else(|| panic!("missing block {cid}"));
        stack.extend(node.links().iter().rev().map(|l| (depth + 1, l.cid)));
        nodes.push((depth, node));
    }
    nodes
}

/// Measure the tree under `root`.
pub async fn stats<D: DagService + ?Sized>(dag: &D, root: &Cid) -> DagStats {
    let mut stats = DagStats::default();
    for (depth, node) in walk(dag, root).await {
        stats.nodes += 1;
        stats.max_links = stats.max_links.max(node.links().len());
        stats.depth = stats.depth.max(depth);
        if node.links().is_empty() {
            stats.leaves += 1;
            stats.leaf_bytes += leaf_payload_len(&node);
        }
    }
    stats
}

fn leaf_payload_len(node: &DagNode) -> u64 {
    match node {
        DagNode::Raw(raw) => raw.size(),
        DagNode::Proto(proto) => FsNode::from_bytes(proto.data())
            .map(|fs| fs.data().len() as u64)
            .unwrap_or(0),
    }
}

/// An in-memory store with import and inspection helpers.
pub struct DagFixture {
    pub store: MemoryDagStore,
}

impl DagFixture {
    pub fn new() -> Self {
        Self {
            store: MemoryDagStore::new(),
        }
    }

    /// Import with the given configuration, panicking on failure.
    pub async fn import(&self, data: &[u8], config: &ImportConfig) -> DagNode {
        Importer::new(config.clone())
            .import(&self.store, data)
            .await
            .expect("import failed")
    }

    /// Import with the default configuration.
    pub async fn import_default(&self, data: &[u8]) -> DagNode {
        import_file(&self.store, data).await.expect("import failed")
    }

    pub async fn walk(&self, root: &Cid) -> Vec<(usize, DagNode)> {
        walk(&self.store, root).await
    }

    pub async fn stats(&self, root: &Cid) -> DagStats {
        stats(&self.store, root).await
    }

    pub async fn read(&self, root: &Cid) -> Vec<u8> {
        unixdag::read_file(&self.store, root)
            .await
            .expect("read failed")
    }
}

impl Default for DagFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A SQLite store in a temporary directory, removed on drop.
pub struct SqliteFixture {
    pub dir: TempDir,
    pub store: SqliteDagStore,
}

impl SqliteFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = SqliteDagStore::open(dir.path().join("blocks.db")).expect("failed to open store");
        Self { dir, store }
    }

    /// Close and reopen the database file.
    pub fn reopen(self) -> Self {
        let Self { dir, store } = self;
        drop(store);
        let store = SqliteDagStore::open(dir.path().join("blocks.db")).expect("failed to reopen store");
        Self { dir, store }
    }
}

impl Default for SqliteFixture {
    fn default() -> Self {
        Self::new()
    }
}
