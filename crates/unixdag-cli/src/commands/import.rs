//! Import Command
//!
//! Imports a file or stdin and prints the root CID.

use std::path::PathBuf;

use anyhow::{Context, Result};
use unixdag::{HashFunction, ImportConfig, Importer, SqliteDagStore};

/// Import arguments
pub struct ImportArgs {
    pub path: String,
    pub config_file: Option<PathBuf>,
    pub chunk_size: Option<usize>,
    pub max_links: Option<usize>,
    pub no_raw_leaves: bool,
    pub cid_version: Option<u64>,
    pub hash: Option<HashFunction>,
    pub no_inline: bool,
    pub verbose: bool,
}

impl ImportArgs {
    /// Settings from the config file, then flags on top.
    pub fn to_config(&self) -> Result<ImportConfig> {
        let mut config = match &self.config_file {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                ImportConfig::from_json(&json)
                    .with_context(|| format!("invalid config {}", path.display()))?
            }
            None => ImportConfig::default(),
        };

        if let Some(chunk_size) = self.chunk_size {
            config.chunk_size = chunk_size;
        }
        if let Some(max_links) = self.max_links {
            config.max_links = max_links;
        }
        if self.no_raw_leaves {
            config.raw_leaves = false;
        }
        if let Some(version) = self.cid_version {
            config.cid_version = version;
            // CIDv0 has neither raw leaves nor inlining.
            if version == 0 {
                config.raw_leaves = false;
                config.inline_limit = None;
            }
        }
        if let Some(hash) = self.hash {
            config.hash_function = hash;
        }
        if self.no_inline {
            config.inline_limit = None;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Run import command
pub async fn run(store: &SqliteDagStore, args: ImportArgs) -> Result<()> {
    let config = args.to_config()?;
    let importer = Importer::new(config);

    let (root, stats) = if args.path == "-" {
        importer
            .import_with_stats(store, tokio::io::stdin())
            .await
            .context("import from stdin failed")?
    } else {
        let file = tokio::fs::File::open(&args.path)
            .await
            .with_context(|| format!("failed to open {}", args.path))?;
        importer
            .import_with_stats(store, file)
            .await
            .with_context(|| format!("import of {} failed", args.path))?
    };

    println!("{}", root.cid());
    if args.verbose {
        eprintln!(
            "{} bytes, {} leaves, {} nodes ({} inlined)",
            stats.bytes, stats.leaves, stats.nodes, stats.inlined
        );
    }

    Ok(())
}
