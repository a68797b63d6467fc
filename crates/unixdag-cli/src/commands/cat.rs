//! Cat Command
//!
//! Writes the content of a file DAG to stdout or a file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use unixdag::{write_file, SqliteDagStore};

use super::parse_cid;

/// Run cat command
pub async fn run(store: &SqliteDagStore, cid: &str, output: Option<PathBuf>) -> Result<()> {
    let cid = parse_cid(cid)?;

    let written = match output {
        Some(path) => {
            let mut file = tokio::fs::File::create(&path)
                .await
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_file(store, &cid, &mut file).await?
        }
        None => {
            let mut stdout = tokio::io::stdout();
            write_file(store, &cid, &mut stdout).await?
        }
    };

    tracing::debug!(%cid, written, "wrote file content");
    Ok(())
}
