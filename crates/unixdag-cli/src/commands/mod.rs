//! Command implementations.

pub mod cat;
pub mod import;
pub mod stat;

use anyhow::{Context, Result};
use unixdag::Cid;

/// Parse a CID given on the command line.
pub fn parse_cid(s: &str) -> Result<Cid> {
    Cid::try_from(s).with_context(|| format!("invalid CID: {s}"))
}
