//! Stat Command
//!
//! Shows what a node is and, for UnixFS nodes, its metadata.

use anyhow::{Context, Result};
use unixdag::{try_extract_fs_node, DagNode, DagServiceExt, ExtractError, SqliteDagStore};

use super::parse_cid;

/// Run stat command
pub async fn run(store: &SqliteDagStore, cid: &str) -> Result<()> {
    let cid = parse_cid(cid)?;
    let node = store
        .get_node(&cid)
        .await?
        .with_context(|| format!("block not found: {cid}"))?;

    for line in describe(&node)? {
        println!("{line}");
    }
    Ok(())
}

/// Human-readable description of a node, one field per line.
pub fn describe(node: &DagNode) -> Result<Vec<String>> {
    let mut lines = vec![
        format!("CID:          {}", node.cid()),
        format!("Kind:         {}", node.kind()),
        format!("Inlined:      {}", node.is_inlined()),
        format!("Links:        {}", node.links().len()),
        format!("Cumulative:   {}", node.size()),
    ];

    match try_extract_fs_node(node) {
        Ok(fs) => {
            lines.push(format!("UnixFS type:  {:?}", fs.data_type()));
            lines.push(format!("File size:    {}", fs.file_size()));
            if !fs.block_sizes().is_empty() {
                let sizes: Vec<String> = fs.block_sizes().iter().map(u64::to_string).collect();
                lines.push(format!("Block sizes:  {}", sizes.join(", ")));
            }
            if let Some(mode) = fs.mode() {
                lines.push(format!("Mode:         {:o}", mode));
            }
            if let Some(mtime) = fs.mtime() {
                lines.push(format!("Modified:     {}", mtime.seconds));
            }
        }
        // A raw leaf's file size is its length.
        Err(ExtractError::RawLeaf { .. }) => {
            lines.push(format!("File size:    {}", node.size()));
        }
        Err(e) => return Err(e.into()),
    }

    Ok(lines)
}
