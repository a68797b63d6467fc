//! # unixdag core
//!
//! Pure primitives for building UnixFS Merkle DAGs: CID prefixes and
//! builders, hash functions, the dag-pb codec, UnixFS metadata, and the
//! closed set of DAG node kinds.
//!
//! This crate contains no I/O, no storage, no async. It is pure computation
//! over content-addressed data structures.
//!
//! ## Key Types
//!
//! - [`DagNode`] - A node of the DAG, either [`ProtoNode`] or [`RawNode`]
//! - [`CidBuilder`] - Computes node identifiers, inlining small content
//! - [`FsNode`] - UnixFS metadata carried by dag-pb nodes
//! - [`Link`] - A sized reference from a dag-pb node to a child
//!
//! ## Encoding
//!
//! dag-pb nodes are written in canonical form (links before data), so CIDs
//! match other UnixFS implementations byte for byte. See [`dagpb`].

pub mod cid;
pub mod dagpb;
pub mod error;
pub mod hash;
pub mod node;
pub mod unixfs;

pub use crate::cid::{is_inlined, CidBuilder, Codec, Prefix};
pub use dagpb::Link;
pub use error::{CoreError, Result};
pub use hash::HashFunction;
pub use node::{DagNode, NodeKind, ProtoNode, RawNode, BLOCK_SIZE_LIMIT};
pub use unixfs::{DataType, FsNode, UnixTime};

pub use libipld::cid::Version as CidVersion;
pub use libipld::Cid;
