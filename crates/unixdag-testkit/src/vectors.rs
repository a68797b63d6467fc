//! Golden test vectors for cross-implementation verification.
//!
//! Each vector is an input plus an import configuration, and the root CID
//! that any UnixFS importer with the same parameters produces.

use unixdag::{ImportConfig, Importer};
use unixdag_core::DagNode;
use unixdag_store::MemoryDagStore;

/// Input content of a vector.
#[derive(Debug, Clone, Copy)]
pub enum Input {
    /// Literal bytes.
    Bytes(&'static [u8]),
    /// `len` bytes counting up from zero, wrapping at 256.
    Counting(usize),
}

impl Input {
    pub fn bytes(&self) -> Vec<u8> {
        match self {
            Input::Bytes(b) => b.to_vec(),
            Input::Counting(len) => (0..*len).map(|i| (i % 256) as u8).collect(),
        }
    }
}

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Content to import.
    pub input: Input,
    /// Chunk size.
    pub chunk_size: usize,
    /// Maximum links per node.
    pub max_links: usize,
    /// Raw leaves.
    pub raw_leaves: bool,
    /// CID version.
    pub cid_version: u64,
    /// Inlining threshold.
    pub inline_limit: Option<usize>,
    /// Expected root CID, in its default string form.
    pub expected_root: &'static str,
}

impl GoldenVector {
    pub fn config(&self) -> ImportConfig {
        ImportConfig {
            chunk_size: self.chunk_size,
            max_links: self.max_links,
            raw_leaves: self.raw_leaves,
            cid_version: self.cid_version,
            inline_limit: self.inline_limit,
            ..Default::default()
        }
    }
}

const MIB: usize = 1024 * 1024;

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "empty input, defaults",
            input: Input::Bytes(b""),
            chunk_size: MIB,
            max_links: 1024,
            raw_leaves: true,
            cid_version: 1,
            inline_limit: Some(32),
            expected_root: "bafkqaaa",
        },
        GoldenVector {
            name: "hello world, defaults",
            input: Input::Bytes(b"hello world"),
            chunk_size: MIB,
            max_links: 1024,
            raw_leaves: true,
            cid_version: 1,
            inline_limit: Some(32),
            expected_root: "bafkqac3imvwgy3zao5xxe3de",
        },
        GoldenVector {
            name: "32 bytes, inlined",
            input: Input::Counting(32),
            chunk_size: MIB,
            max_links: 1024,
            raw_leaves: true,
            cid_version: 1,
            inline_limit: Some(32),
            expected_root: "bafkqaiaaaebagbafaydqqcikbmga2dqpcaireeyuculbogazdinryhi6d4",
        },
        GoldenVector {
            name: "33 bytes, hashed",
            input: Input::Counting(33),
            chunk_size: MIB,
            max_links: 1024,
            raw_leaves: true,
            cid_version: 1,
            inline_limit: Some(32),
            expected_root: "bafkreic5r7h67kno5nyr7ohndzfx2xektox2i3uoo3tivimk3ts2cdpwvm",
        },
        GoldenVector {
            name: "empty input, unixfs leaves",
            input: Input::Bytes(b""),
            chunk_size: MIB,
            max_links: 1024,
            raw_leaves: false,
            cid_version: 1,
            inline_limit: Some(32),
            expected_root: "bafyaabqkaqeaegaa",
        },
        GoldenVector {
            name: "hello world, unixfs leaves",
            input: Input::Bytes(b"hello world"),
            chunk_size: MIB,
            max_links: 1024,
            raw_leaves: false,
            cid_version: 1,
            inline_limit: Some(32),
            expected_root: "bafyaaeykceeaeeqlnbswy3dpeb3w64tmmqmaw",
        },
        GoldenVector {
            name: "empty input, cidv0",
            input: Input::Bytes(b""),
            chunk_size: MIB,
            max_links: 1024,
            raw_leaves: false,
            cid_version: 0,
            inline_limit: None,
            expected_root: "QmbFMke1KXqnYyBBWxB74N4c5SBnJMVAiMNRcGu6x1AwQH",
        },
        GoldenVector {
            name: "hello world, cidv0",
            input: Input::Bytes(b"hello world"),
            chunk_size: MIB,
            max_links: 1024,
            raw_leaves: false,
            cid_version: 0,
            inline_limit: None,
            expected_root: "Qmf412jQZiuVUtdgnB36FXFX7xg5V6KEbSJ4dpQuhkLyfD",
        },
        GoldenVector {
            name: "three raw leaves under one root",
            input: Input::Counting(100),
            chunk_size: 40,
            max_links: 1024,
            raw_leaves: true,
            cid_version: 1,
            inline_limit: None,
            expected_root: "bafybeicqlz7wedxtplgkby4rdgf577xiuauyfyzy6cwmymgtaapd4hkvnu",
        },
        GoldenVector {
            name: "twenty raw leaves, fanout 4",
            input: Input::Counting(200),
            chunk_size: 10,
            max_links: 4,
            raw_leaves: true,
            cid_version: 1,
            inline_limit: Some(32),
            expected_root: "bafybeidxr7q6gwjsum5lj2x3jmsybmjookza22lli5oxag2aslf6dkmuhq",
        },
        GoldenVector {
            name: "twenty unixfs leaves, fanout 4",
            input: Input::Counting(200),
            chunk_size: 10,
            max_links: 4,
            raw_leaves: false,
            cid_version: 1,
            inline_limit: Some(32),
            expected_root: "bafybeieitahkskfpxdxjwfaiidtvqsaqicyigsbmcdzznirambprga6g7q",
        },
    ]
}

/// Import a vector's input into a fresh in-memory store.
pub async fn import_vector(vector: &GoldenVector) -> DagNode {
    let store = MemoryDagStore::new();
    Importer::new(vector.config())
        .import(&store, &vector.input.bytes()[..])
        .await
        .unwrap_or_else(|e| panic!("{}: import failed: {e}", vector.name))
}

/// Import every vector and compare against the expected root.
///
/// Returns `(name, matches, actual root CID)` per vector.
pub async fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let mut results = Vec::new();
    for vector in all_vectors() {
        let root = import_vector(&vector).await.cid().to_string();
        results.push((vector.name.to_string(), root == vector.expected_root, root));
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::block_on;

    #[test]
    fn test_vector_configs_are_valid() {
        for vector in all_vectors() {
            vector
                .config()
                .validate()
                .unwrap_or_else(|e| panic!("{}: {e}", vector.name));
        }
    }

    #[test]
    fn test_vectors_are_deterministic() {
        for vector in all_vectors() {
            let a = block_on(import_vector(&vector));
            let b = block_on(import_vector(&vector));
            assert_eq!(a.cid(), b.cid(), "vector {} is not deterministic", vector.name);
        }
    }

    #[test]
    fn test_counting_input() {
        assert_eq!(Input::Counting(3).bytes(), vec![0, 1, 2]);
        assert_eq!(Input::Counting(300).bytes()[256], 0);
    }
}
