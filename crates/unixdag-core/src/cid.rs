//! CID prefixes and builders.
//!
//! A [`Prefix`] fixes version, codec and hash function. A [`CidBuilder`] adds
//! the inlining policy: content at or below the inline limit is embedded in
//! the CID through the identity multihash instead of being hashed.

use libipld::cid::Version;
use libipld::Cid;

use crate::error::{CoreError, Result};
use crate::hash::{identity, HashFunction, IDENTITY_CODE};

/// Node codecs produced by the importer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    /// Protobuf-encoded node, may carry UnixFS framing.
    DagPb,
    /// Raw bytes with no framing.
    Raw,
}

impl Codec {
    /// Multicodec code.
    pub const fn code(self) -> u64 {
        match self {
            Self::DagPb => 0x70,
            Self::Raw => 0x55,
        }
    }

    /// Look up a codec by multicodec code.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0x70 => Some(Self::DagPb),
            0x55 => Some(Self::Raw),
            _ => None,
        }
    }
}

/// Version, codec and hash function for computing CIDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prefix {
    pub version: Version,
    pub codec: Codec,
    pub hash: HashFunction,
}

impl Prefix {
    /// The dag-pb prefix for a CID version.
    ///
    /// Only versions 0 and 1 exist; both start out with SHA2-256.
    pub fn for_cid_version(version: u64) -> Result<Self> {
        let version = match version {
            0 => Version::V0,
            1 => Version::V1,
            other => return Err(CoreError::UnsupportedCidVersion(other)),
        };
        Ok(Self {
            version,
            codec: Codec::DagPb,
            hash: HashFunction::Sha2_256,
        })
    }

    /// Replace the hash function.
    pub fn with_hash(mut self, hash: HashFunction) -> Self {
        self.hash = hash;
        self
    }

    /// Replace the codec.
    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    /// Hash `data` into a CID.
    pub fn sum(&self, data: &[u8]) -> Result<Cid> {
        let mh = self.hash.digest(data)?;
        Ok(Cid::new(self.version, self.codec.code(), mh)?)
    }
}

/// Computes CIDs for serialized nodes, inlining small content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CidBuilder {
    prefix: Prefix,
    inline_limit: Option<usize>,
}

impl CidBuilder {
    /// A builder that always hashes.
    pub fn new(prefix: Prefix) -> Self {
        Self {
            prefix,
            inline_limit: None,
        }
    }

    /// A builder that inlines content of at most `limit` bytes.
    pub fn inline(prefix: Prefix, limit: usize) -> Self {
        Self {
            prefix,
            inline_limit: Some(limit),
        }
    }

    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    pub fn inline_limit(&self) -> Option<usize> {
        self.inline_limit
    }

    pub fn codec(&self) -> Codec {
        self.prefix.codec
    }

    /// Same hash, version and inlining, different codec.
    pub fn with_codec(&self, codec: Codec) -> Self {
        Self {
            prefix: self.prefix.with_codec(codec),
            inline_limit: self.inline_limit,
        }
    }

    /// Compute the CID of `data`.
    ///
    /// Inlined CIDs are always version 1.
    pub fn sum(&self, data: &[u8]) -> Result<Cid> {
        match self.inline_limit {
            Some(limit) if data.len() <= limit => {
                Ok(Cid::new_v1(self.prefix.codec.code(), identity(data)?))
            }
            _ => self.prefix.sum(data),
        }
    }
}

/// Whether a CID embeds its content instead of a digest.
pub fn is_inlined(cid: &Cid) -> bool {
    cid.hash().code() == IDENTITY_CODE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v1_inline() -> CidBuilder {
        CidBuilder::inline(Prefix::for_cid_version(1).unwrap(), 32).with_codec(Codec::Raw)
    }

    #[test]
    fn test_prefix_versions() {
        let v0 = Prefix::for_cid_version(0).unwrap();
        assert_eq!(v0.version, Version::V0);
        assert_eq!(v0.codec, Codec::DagPb);
        assert_eq!(v0.hash, HashFunction::Sha2_256);

        let v1 = Prefix::for_cid_version(1).unwrap();
        assert_eq!(v1.version, Version::V1);

        assert!(matches!(
            Prefix::for_cid_version(2),
            Err(CoreError::UnsupportedCidVersion(2))
        ));
    }

    #[test]
    fn test_inline_boundary() {
        let builder = v1_inline();

        let at_limit: Vec<u8> = (0u8..32).collect();
        let cid = builder.sum(&at_limit).unwrap();
        assert!(is_inlined(&cid));
        assert_eq!(cid.hash().digest(), at_limit.as_slice());
        assert_eq!(
            cid.to_string(),
            "bafkqaiaaaebagbafaydqqcikbmga2dqpcaireeyuculbogazdinryhi6d4"
        );

        let over_limit: Vec<u8> = (0u8..33).collect();
        let cid = builder.sum(&over_limit).unwrap();
        assert!(!is_inlined(&cid));
        assert_eq!(
            cid.to_string(),
            "bafkreic5r7h67kno5nyr7ohndzfx2xektox2i3uoo3tivimk3ts2cdpwvm"
        );
    }

    #[test]
    fn test_without_inlining_always_hashes() {
        let builder = CidBuilder::new(Prefix::for_cid_version(1).unwrap());
        let cid = builder.sum(b"tiny").unwrap();
        assert!(!is_inlined(&cid));
        assert_eq!(cid.codec(), Codec::DagPb.code());
    }

    #[test]
    fn test_with_codec_keeps_policy() {
        let builder = v1_inline();
        assert_eq!(builder.codec(), Codec::Raw);
        assert_eq!(builder.inline_limit(), Some(32));
        assert_eq!(builder.with_codec(Codec::DagPb).inline_limit(), Some(32));
    }

    #[test]
    fn test_sum_is_deterministic() {
        let builder = v1_inline().with_codec(Codec::DagPb);
        let data = vec![7u8; 100];
        assert_eq!(builder.sum(&data).unwrap(), builder.sum(&data).unwrap());
    }

    #[test]
    fn test_v0_rejects_raw_codec() {
        let prefix = Prefix::for_cid_version(0).unwrap().with_codec(Codec::Raw);
        assert!(prefix.sum(b"data").is_err());
    }

    #[test]
    fn test_v0_known_answer() {
        let prefix = Prefix::for_cid_version(0).unwrap();
        let empty_file = hex::decode("0a0408021800").unwrap();
        assert_eq!(
            prefix.sum(&empty_file).unwrap().to_string(),
            "QmbFMke1KXqnYyBBWxB74N4c5SBnJMVAiMNRcGu6x1AwQH"
        );
    }
}
