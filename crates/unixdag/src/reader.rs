//! Reading file content back out of a DAG.

use tokio::io::{AsyncWrite, AsyncWriteExt};
use unixdag_core::{Cid, DagNode, DataType, FsNode};
use unixdag_store::{DagService, DagServiceExt};

use crate::error::ReadError;

/// Stream the content of the file rooted at `root` into `writer`.
///
/// The DAG is walked depth-first in link order; at most one node is held
/// in memory at a time besides the pending link list. Returns the number
/// of bytes written.
pub async fn write_file<D, W>(dag: &D, root: &Cid, writer: &mut W) -> Result<u64, ReadError>
where
    D: DagService + ?Sized,
    W: AsyncWrite + Unpin + Send,
{
    let mut pending = vec![*root];
    let mut written = 0u64;

    while let Some(cid) = pending.pop() {
        let node = dag
            .get_node(&cid)
            .await?
            .ok_or(ReadError::MissingBlock(cid))?;

        match node {
            DagNode::Raw(raw) => {
                writer.write_all(raw.data()).await?;
                written += raw.size();
            }
            DagNode::Proto(proto) => {
                let fs = FsNode::from_bytes(proto.data())?;
                match fs.data_type() {
                    DataType::File | DataType::Raw => {}
                    data_type => return Err(ReadError::NotAFile { cid, data_type }),
                }
                writer.write_all(fs.data()).await?;
                written += fs.data().len() as u64;
                pending.extend(proto.links().iter().rev().map(|link| link.cid));
            }
        }
    }

    writer.flush().await?;
    Ok(written)
}

/// Read the whole file rooted at `root` into memory.
pub async fn read_file<D>(dag: &D, root: &Cid) -> Result<Vec<u8>, ReadError>
where
    D: DagService + ?Sized,
{
    let mut buf = Vec::new();
    write_file(dag, root, &mut buf).await?;
    Ok(buf)
}
