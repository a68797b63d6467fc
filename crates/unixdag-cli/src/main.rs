//! unixdag CLI
//!
//! Import files into a SQLite block database as UnixFS DAGs and read them
//! back.
//!
//! # Commands
//! - `import` - Import a file (or stdin) and print its root CID
//! - `stat` - Show what a node is: kind, links, sizes, UnixFS metadata
//! - `cat` - Write the file content under a root CID
//!
//! # Logging
//! Set `RUST_LOG` (for example `RUST_LOG=unixdag=debug`) to see import
//! progress on stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::{cat, import, stat};
use unixdag::{HashFunction, SqliteDagStore};

#[derive(Parser)]
#[command(name = "unixdag")]
#[command(about = "Import files as UnixFS DAGs into a local block database")]
#[command(version)]
struct Cli {
    /// Path to the block database
    #[arg(long, global = true, env = "UNIXDAG_DB", default_value = "unixdag.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a file and print its root CID
    Import {
        /// File to import, or `-` for stdin
        path: String,

        /// JSON file with import settings; flags below override it
        #[arg(long)]
        config: Option<PathBuf>,

        /// Chunk size in bytes
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Maximum links per node
        #[arg(long)]
        max_links: Option<usize>,

        /// Wrap leaves in UnixFS file nodes instead of raw blocks
        #[arg(long)]
        no_raw_leaves: bool,

        /// CID version (0 or 1)
        #[arg(long)]
        cid_version: Option<u64>,

        /// Hash function: sha2-256, sha2-512 or blake3
        #[arg(long)]
        hash: Option<HashFunction>,

        /// Never embed small nodes in their CID
        #[arg(long)]
        no_inline: bool,

        /// Print import statistics
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show information about a node
    Stat {
        /// CID of the node
        cid: String,
    },

    /// Write the content of a file DAG
    Cat {
        /// Root CID of the file
        cid: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let store = SqliteDagStore::open(&cli.db)
        .with_context(|| format!("failed to open block database {}", cli.db.display()))?;

    match cli.command {
        Commands::Import {
            path,
            config,
            chunk_size,
            max_links,
            no_raw_leaves,
            cid_version,
            hash,
            no_inline,
            verbose,
        } => {
            let config = import::ImportArgs {
                path,
                config_file: config,
                chunk_size,
                max_links,
                no_raw_leaves,
                cid_version,
                hash,
                no_inline,
                verbose,
            };
            import::run(&store, config).await?;
        }

        Commands::Stat { cid } => {
            stat::run(&store, &cid).await?;
        }

        Commands::Cat { cid, output } => {
            cat::run(&store, &cid, output).await?;
        }
    }

    Ok(())
}
