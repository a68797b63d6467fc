//! dag-pb encoding.
//!
//! A dag-pb node is a protobuf `PBNode { Data = 1; Links = 2 }` whose
//! canonical form writes every link before the data section. Both directions
//! go through `libipld`'s dag-pb codec.

use bytes::Bytes;
use libipld::pb::{PbLink, PbNode};
use libipld::Cid;

use crate::error::{CoreError, Result};

/// A named, sized reference from a dag-pb node to a child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    /// Link name, empty for file chunks.
    pub name: String,
    /// Cumulative size of the linked subtree.
    pub size: u64,
    /// The child's identifier.
    pub cid: Cid,
}

impl Link {
    pub fn new(name: impl Into<String>, size: u64, cid: Cid) -> Self {
        Self {
            name: name.into(),
            size,
            cid,
        }
    }
}

impl From<&Link> for PbLink {
    fn from(link: &Link) -> Self {
        // Empty names are still written, as other UnixFS importers do.
        PbLink {
            cid: link.cid,
            name: Some(link.name.clone()),
            size: Some(link.size),
        }
    }
}

impl From<PbLink> for Link {
    fn from(link: PbLink) -> Self {
        Self {
            name: link.name.unwrap_or_default(),
            size: link.size.unwrap_or_default(),
            cid: link.cid,
        }
    }
}

/// Encode a node in canonical dag-pb form.
///
/// `data` is omitted entirely when `None`. Links are stably sorted by name,
/// so unnamed file chunks keep their order.
pub fn encode(data: Option<&[u8]>, links: &[Link]) -> Vec<u8> {
    let node = PbNode {
        links: links.iter().map(PbLink::from).collect(),
        data: data.map(Bytes::copy_from_slice),
    };
    node.into_bytes().into_vec()
}

/// Decode a dag-pb node into its data section and links.
pub fn decode(bytes: Bytes) -> Result<(Option<Bytes>, Vec<Link>)> {
    let node = PbNode::from_bytes(bytes).map_err(|e| CoreError::MalformedNode(e.to_string()))?;
    Ok((node.data, node.links.into_iter().map(Link::from).collect()))
}
