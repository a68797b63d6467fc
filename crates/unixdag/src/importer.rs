//! Importing a byte stream as a UnixFS file.

use tokio::io::AsyncRead;
use unixdag_core::DagNode;
use unixdag_store::DagService;

use crate::balanced;
use crate::builder::{DagBuilder, ImportStats};
use crate::chunker::SizeSplitter;
use crate::config::ImportConfig;
use crate::error::ImportError;

/// Imports byte streams into a DAG service with a fixed configuration.
///
/// The stream is consumed exactly once, in order. Nodes are persisted as
/// they are created; if the import fails part way, nodes already written
/// stay in the store.
#[derive(Debug, Clone, Default)]
pub struct Importer {
    config: ImportConfig,
}

impl Importer {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Import `reader` and return the root node.
    pub async fn import<D, R>(&self, dag: &D, reader: R) -> Result<DagNode, ImportError>
    where
        D: DagService + ?Sized,
        R: AsyncRead + Unpin + Send,
    {
        self.import_with_stats(dag, reader).await.map(|(root, _)| root)
    }

    /// Import `reader` and return the root node with import counters.
    pub async fn import_with_stats<D, R>(
        &self,
        dag: &D,
        reader: R,
    ) -> Result<(DagNode, ImportStats), ImportError>
    where
        D: DagService + ?Sized,
        R: AsyncRead + Unpin + Send,
    {
        let splitter = SizeSplitter::new(reader, self.config.chunk_size);
        let mut db = DagBuilder::new(splitter, dag, &self.config)?;

        tracing::debug!(
            chunk_size = self.config.chunk_size,
            max_links = self.config.max_links,
            raw_leaves = self.config.raw_leaves,
            hash = %self.config.hash_function,
            "starting import"
        );

        let root = balanced::layout(&mut db).await?;
        let stats = db.stats();

        tracing::debug!(
            root = %root.cid(),
            bytes = stats.bytes,
            leaves = stats.leaves,
            nodes = stats.nodes,
            inlined = stats.inlined,
            "import finished"
        );

        Ok((root, stats))
    }
}

/// Import `reader` into `dag` with the default configuration: 1 MiB chunks,
/// 1024 links per node, raw leaves, CIDv1, SHA2-256, 32-byte inlining.
pub async fn import_file<D, R>(dag: &D, reader: R) -> Result<DagNode, ImportError>
where
    D: DagService + ?Sized,
    R: AsyncRead + Unpin + Send,
{
    Importer::default().import(dag, reader).await
}
