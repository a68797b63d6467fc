//! Balanced layout.
//!
//! Leaves are filled left to right. Whenever the current root is full and
//! input remains, the tree grows one level: a new parent takes the old root
//! as its first child and is filled with subtrees of the old root's depth.
//! Every leaf ends up at the same depth, except that the last subtree may be
//! incomplete.
//!
//! ```text
//!                      +-------------+
//!                      |   Root 4    |
//!                      +-------------+
//!                            |
//!         +------------------+------------------+
//!         |                                     |
//!   +-------------+                       +-------------+
//!   |   Node 2    |                       |   Node 3    |
//!   +-------------+                       +-------------+
//!         |                                     |
//!   +-----+-----+                         +-----+-----+
//!   |           |                         |           |
//! Leaf 1     Leaf 2                     Leaf 3     Leaf 4
//! ```

use std::future::Future;
use std::pin::Pin;

use unixdag_core::DagNode;
use unixdag_store::DagService;

use crate::builder::{DagBuilder, FileNode};
use crate::chunker::Splitter;
use crate::error::ImportError;

type FillResult<'b> = Pin<Box<dyn Future<Output = Result<(DagNode, u64), ImportError>> + Send + 'b>>;

/// Build the balanced DAG for everything the builder's splitter yields and
/// return its root. The root is persisted last.
pub async fn layout<D, S>(db: &mut DagBuilder<'_, D, S>) -> Result<DagNode, ImportError>
where
    D: DagService + ?Sized,
    S: Splitter,
{
    if db.is_done().await? {
        let root = db.new_leaf_node(Vec::new())?;
        db.add(&root).await?;
        return Ok(root);
    }

    let (mut root, mut file_size) = db.new_leaf_data_node().await?;

    let mut depth = 1;
    while !db.is_done().await? {
        let mut parent = FileNode::new();
        db.add_child(&mut parent, root, file_size).await?;
        (root, file_size) = fill_node_rec(db, parent, depth).await?;
        depth += 1;
    }

    db.add(&root).await?;
    tracing::trace!(depth, cid = %root.cid(), "balanced layout complete");
    Ok(root)
}

/// Fill `node` with subtrees of `depth - 1` (leaves at depth 1) until it is
/// full or the input runs out, then encode it. Returns the encoded node and
/// the file size it covers. The node itself is not persisted.
fn fill_node_rec<'b, 'a, D, S>(
    db: &'b mut DagBuilder<'a, D, S>,
    node: FileNode,
    depth: usize,
) -> FillResult<'b>
where
    D: DagService + ?Sized + 'b,
    S: Splitter + 'b,
    'a: 'b,
{
    Box::pin(async move {
        let mut node = node;
        while node.num_children() < db.max_links() && !db.is_done().await? {
            let (child, child_size) = if depth <= 1 {
                db.new_leaf_data_node().await?
            } else {
                fill_node_rec(db, FileNode::new(), depth - 1).await?
            };
            db.add_child(&mut node, child, child_size).await?;
        }

        let file_size = node.file_size();
        let filled = db.commit(node)?;
        Ok((filled, file_size))
    })
}
