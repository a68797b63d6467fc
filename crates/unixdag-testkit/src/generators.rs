//! Proptest generators for property-based testing.

use proptest::prelude::*;

use unixdag::ImportConfig;
use unixdag_core::HashFunction;

/// Generate a small chunk size, so that short inputs still span many leaves.
pub fn chunk_size() -> impl Strategy<Value = usize> {
    1usize..=64
}

/// Generate a small fanout.
pub fn max_links() -> impl Strategy<Value = usize> {
    2usize..=8
}

/// Generate any supported hash function.
pub fn hash_function() -> impl Strategy<Value = HashFunction> {
    prop_oneof![
        Just(HashFunction::Sha2_256),
        Just(HashFunction::Sha2_512),
        Just(HashFunction::Blake3_256),
    ]
}

/// Generate file content of at most `max_len` bytes.
pub fn file_bytes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a valid CIDv1 import configuration.
pub fn config_strategy() -> impl Strategy<Value = ImportConfig> {
    (
        chunk_size(),
        max_links(),
        any::<bool>(),
        hash_function(),
        prop::option::of(0usize..=64),
    )
        .prop_map(
            |(chunk_size, max_links, raw_leaves, hash_function, inline_limit)| ImportConfig {
                chunk_size,
                max_links,
                raw_leaves,
                cid_version: 1,
                hash_function,
                inline_limit,
            },
        )
}

/// Parameters for one import.
#[derive(Debug, Clone)]
pub struct ImportParams {
    pub data: Vec<u8>,
    pub config: ImportConfig,
}

impl ImportParams {
    /// Number of leaves the balanced layout must produce.
    pub fn expected_leaves(&self) -> usize {
        self.data.len().div_ceil(self.config.chunk_size).max(1)
    }
}

impl Arbitrary for ImportParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (file_bytes(2048), config_strategy())
            .prop_map(|(data, config)| ImportParams { data, config })
            .boxed()
    }
}
