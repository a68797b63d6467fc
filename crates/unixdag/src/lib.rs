//! # unixdag
//!
//! Import byte streams as UnixFS files into a content-addressed Merkle DAG,
//! and interpret DAG nodes as UnixFS metadata.
//!
//! ## Overview
//!
//! [`import_file`] splits a stream into fixed-size chunks, arranges them in
//! a balanced tree of bounded fanout and persists every node into a
//! [`DagService`] as it is created. The returned root identifies the whole
//! file: importing the same bytes with the same configuration always yields
//! the same root CID.
//!
//! [`try_extract_fs_node`] reads the UnixFS metadata (type, file size, block
//! sizes) of a node. Raw leaves carry no metadata and are reported as
//! [`ExtractError::RawLeaf`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use unixdag::{import_file, try_extract_fs_node, MemoryDagStore};
//!
//! async fn example() {
//!     let store = MemoryDagStore::new();
//!     let data = vec![0u8; 4 * 1024 * 1024];
//!     let root = import_file(&store, &data[..]).await.unwrap();
//!
//!     let fs = try_extract_fs_node(&root).unwrap();
//!     assert_eq!(fs.file_size(), data.len() as u64);
//!     println!("{}", root.cid());
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Explicit configuration**: every parameter lives in [`ImportConfig`];
//!   nothing is read from process-wide state
//! - **Sequential**: one chunk of lookahead, one pending parent per level;
//!   the importer spawns no tasks
//! - **No rollback**: a failed import leaves already-written nodes in place

pub mod balanced;
pub mod builder;
pub mod chunker;
pub mod config;
pub mod error;
pub mod extract;
pub mod importer;
pub mod reader;

pub use builder::{DagBuilder, FileNode, ImportStats};
pub use chunker::{SizeSplitter, Splitter};
pub use config::{
    ImportConfig, DEFAULT_CHUNK_SIZE, DEFAULT_CID_VERSION, DEFAULT_INLINE_LIMIT, DEFAULT_MAX_LINKS,
    MAX_INLINE_LIMIT,
};
pub use error::{ExtractError, ImportError, ReadError};
pub use extract::try_extract_fs_node;
pub use importer::{import_file, Importer};
pub use reader::{read_file, write_file};

// Re-export the layers below for convenience.
pub use unixdag_core::{
    Cid, CidBuilder, CoreError, DagNode, DataType, FsNode, HashFunction, Link, NodeKind, Prefix,
    ProtoNode,
};
pub use unixdag_store::{
    DagService, DagServiceExt, InsertResult, MemoryDagStore, SqliteDagStore, StoreError,
};
