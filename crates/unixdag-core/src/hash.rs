//! Hash functions usable for node identifiers.
//!
//! Digests are computed with the `sha2` and `blake3` crates and wrapped into
//! multihashes by code, so the selected function travels with every CID.

use libipld::multihash::Multihash;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// Multihash code of the identity "hash" used for inlined content.
pub const IDENTITY_CODE: u64 = 0x00;

/// A hash function selectable for non-inlined nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HashFunction {
    /// SHA2-256, the default.
    #[default]
    #[serde(rename = "sha2-256")]
    Sha2_256,
    #[serde(rename = "sha2-512")]
    Sha2_512,
    #[serde(rename = "blake3")]
    Blake3_256,
}

impl HashFunction {
    /// The multihash code of this function.
    pub const fn code(self) -> u64 {
        match self {
            Self::Sha2_256 => 0x12,
            Self::Sha2_512 => 0x13,
            Self::Blake3_256 => 0x1e,
        }
    }

    /// Look up a hash function by multihash code.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0x12 => Some(Self::Sha2_256),
            0x13 => Some(Self::Sha2_512),
            0x1e => Some(Self::Blake3_256),
            _ => None,
        }
    }

    /// Hash `data` and wrap the digest as a multihash.
    pub fn digest(self, data: &[u8]) -> Result<Multihash> {
        let mh = match self {
            Self::Sha2_256 => Multihash::wrap(self.code(), &Sha256::digest(data))?,
            Self::Sha2_512 => Multihash::wrap(self.code(), &Sha512::digest(data))?,
            Self::Blake3_256 => Multihash::wrap(self.code(), blake3::hash(data).as_bytes())?,
        };
        Ok(mh)
    }

    /// Canonical multicodec table name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha2_256 => "sha2-256",
            Self::Sha2_512 => "sha2-512",
            Self::Blake3_256 => "blake3",
        }
    }
}

impl fmt::Display for HashFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashFunction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sha2-256" | "sha256" => Ok(Self::Sha2_256),
            "sha2-512" | "sha512" => Ok(Self::Sha2_512),
            "blake3" => Ok(Self::Blake3_256),
            other => Err(CoreError::InvalidConfig(format!(
                "unknown hash function: {}",
                other
            ))),
        }
    }
}

/// Wrap `data` verbatim in an identity multihash.
pub fn identity(data: &[u8]) -> Result<Multihash> {
    Ok(Multihash::wrap(IDENTITY_CODE, data)?)
}
