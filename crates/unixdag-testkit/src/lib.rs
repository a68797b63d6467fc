//! # unixdag testkit
//!
//! Testing utilities for unixdag.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known inputs with the root CIDs every conforming
//!   UnixFS importer must produce
//! - **Generators**: Proptest strategies for import inputs and configurations
//! - **Fixtures**: Stores plus helpers to walk and measure imported DAGs
//!
//! ## Golden Vectors
//!
//! ```rust
//! use unixdag_testkit::fixtures::block_on;
//! use unixdag_testkit::vectors::verify_all_vectors;
//!
//! for (name, ok, cid) in block_on(verify_all_vectors()) {
//!     println!("{name}: {cid} ({})", if ok { "ok" } else { "MISMATCH" });
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use unixdag_testkit::{block_on, DagFixture, ImportParams};
//!
//! proptest! {
//!     #[test]
//!     fn import_is_deterministic(params: ImportParams) {
//!         let fixture = DagFixture::new();
//!         let a = block_on(fixture.import(&params.data, &params.config));
//!         let b = block_on(fixture.import(&params.data, &params.config));
//!         prop_assert_eq!(a.cid(), b.cid());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use unixdag::ImportConfig;
//! use unixdag_testkit::{block_on, patterned_bytes, DagFixture};
//!
//! let fixture = DagFixture::new();
//! let config = ImportConfig { chunk_size: 64, max_links: 4, ..Default::default() };
//! let root = block_on(fixture.import(&patterned_bytes(1000, 1), &config));
//! let stats = block_on(fixture.stats(root.cid()));
//! assert!(stats.max_links <= 4);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{block_on, patterned_bytes, DagFixture, DagStats, SqliteFixture};
pub use generators::{config_strategy, ImportParams};
pub use vectors::{all_vectors, import_vector, verify_all_vectors, GoldenVector, Input};
