//! DAG nodes.
//!
//! A node is immutable once built: its encoded bytes and CID are computed at
//! construction and never change. The set of node kinds is closed.

use bytes::Bytes;
use libipld::Cid;
use std::fmt;

use crate::cid::{is_inlined, CidBuilder, Codec};
use crate::dagpb::{self, Link};
use crate::error::{CoreError, Result};

/// Maximum size of a leaf's content.
pub const BLOCK_SIZE_LIMIT: usize = 1024 * 1024;

/// Discriminator for [`DagNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// dag-pb node; its data section may hold UnixFS metadata.
    Proto,
    /// Raw leaf, bytes only.
    Raw,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Proto => f.write_str("dag-pb"),
            NodeKind::Raw => f.write_str("raw"),
        }
    }
}

/// A dag-pb node.
#[derive(Clone, PartialEq, Eq)]
pub struct ProtoNode {
    cid: Cid,
    data: Option<Bytes>,
    links: Vec<Link>,
    encoded: Bytes,
}

impl ProtoNode {
    /// Encode and identify a new node.
    pub fn new(data: Option<Vec<u8>>, links: Vec<Link>, builder: &CidBuilder) -> Result<Self> {
        let encoded = dagpb::encode(data.as_deref(), &links);
        let cid = builder.with_codec(Codec::DagPb).sum(&encoded)?;
        Ok(Self {
            cid,
            data: data.map(Bytes::from),
            links,
            encoded: Bytes::from(encoded),
        })
    }

    /// Rebuild a node from stored bytes. The CID is trusted.
    pub fn decode(cid: Cid, encoded: Bytes) -> Result<Self> {
        let (data, links) = dagpb::decode(encoded.clone())?;
        Ok(Self {
            cid,
            data,
            links,
            encoded,
        })
    }

    pub fn cid(&self) -> &Cid {
        &self.cid
    }

    /// The data section, empty when absent.
    pub fn data(&self) -> &[u8] {
        self.data.as_deref().unwrap_or_default()
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn raw_data(&self) -> &Bytes {
        &self.encoded
    }

    /// Encoded length plus the cumulative size of every link.
    pub fn size(&self) -> u64 {
        self.encoded.len() as u64 + self.links.iter().map(|l| l.size).sum::<u64>()
    }
}

impl fmt::Debug for ProtoNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtoNode")
            .field("cid", &self.cid.to_string())
            .field("links", &self.links.len())
            .field("encoded_len", &self.encoded.len())
            .finish()
    }
}

/// A raw leaf.
#[derive(Clone, PartialEq, Eq)]
pub struct RawNode {
    cid: Cid,
    data: Bytes,
}

impl RawNode {
    pub fn new(data: impl Into<Bytes>, builder: &CidBuilder) -> Result<Self> {
        let data = data.into();
        let cid = builder.with_codec(Codec::Raw).sum(&data)?;
        Ok(Self { cid, data })
    }

    /// Rebuild from stored bytes. The CID is trusted.
    pub fn decode(cid: Cid, data: Bytes) -> Self {
        Self { cid, data }
    }

    pub fn cid(&self) -> &Cid {
        &self.cid
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

impl fmt::Debug for RawNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawNode")
            .field("cid", &self.cid.to_string())
            .field("len", &self.data.len())
            .finish()
    }
}

/// A node of the Merkle DAG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DagNode {
    Proto(ProtoNode),
    Raw(RawNode),
}

impl DagNode {
    /// Decode stored bytes according to the CID's codec.
    pub fn decode(cid: Cid, bytes: Bytes) -> Result<Self> {
        match Codec::from_code(cid.codec()) {
            Some(Codec::DagPb) => Ok(DagNode::Proto(ProtoNode::decode(cid, bytes)?)),
            Some(Codec::Raw) => Ok(DagNode::Raw(RawNode::decode(cid, bytes))),
            None => Err(CoreError::UnsupportedCodec(cid.codec())),
        }
    }

    /// Rebuild a node from an inlined CID without any storage lookup.
    pub fn from_inlined(cid: &Cid) -> Result<Option<Self>> {
        if !is_inlined(cid) {
            return Ok(None);
        }
        let bytes = Bytes::copy_from_slice(cid.hash().digest());
        Self::decode(*cid, bytes).map(Some)
    }

    pub fn cid(&self) -> &Cid {
        match self {
            DagNode::Proto(n) => n.cid(),
            DagNode::Raw(n) => n.cid(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            DagNode::Proto(_) => NodeKind::Proto,
            DagNode::Raw(_) => NodeKind::Raw,
        }
    }

    /// The serialized block.
    pub fn raw_data(&self) -> &Bytes {
        match self {
            DagNode::Proto(n) => n.raw_data(),
            DagNode::Raw(n) => n.data(),
        }
    }

    pub fn links(&self) -> &[Link] {
        match self {
            DagNode::Proto(n) => n.links(),
            DagNode::Raw(_) => &[],
        }
    }

    /// Cumulative size of the subtree rooted here.
    pub fn size(&self) -> u64 {
        match self {
            DagNode::Proto(n) => n.size(),
            DagNode::Raw(n) => n.size(),
        }
    }

    pub fn is_inlined(&self) -> bool {
        is_inlined(self.cid())
    }
}

impl From<ProtoNode> for DagNode {
    fn from(node: ProtoNode) -> Self {
        DagNode::Proto(node)
    }
}

impl From<RawNode> for DagNode {
    fn from(node: RawNode) -> Self {
        DagNode::Raw(node)
    }
}
