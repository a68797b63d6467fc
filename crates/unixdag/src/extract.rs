//! Interpreting a DAG node as UnixFS metadata.

use unixdag_core::{DagNode, FsNode};

use crate::error::ExtractError;

/// Decode the UnixFS metadata of a node.
///
/// Only dag-pb nodes carry UnixFS framing. A raw leaf yields
/// [`ExtractError::RawLeaf`]; its file size is simply its byte length. A
/// dag-pb node whose data section is not valid UnixFS yields
/// [`ExtractError::Decode`]. Nothing is ever partially decoded.
pub fn try_extract_fs_node(node: &DagNode) -> Result<FsNode, ExtractError> {
    match node {
        DagNode::Proto(proto) => Ok(FsNode::from_bytes(proto.data())?),
        DagNode::Raw(raw) => Err(ExtractError::RawLeaf { cid: *raw.cid() }),
    }
}
