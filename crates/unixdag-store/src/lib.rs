//! # unixdag store
//!
//! The DAG storage service. Provides a trait-based interface for block
//! persistence with SQLite and in-memory implementations.
//!
//! ## Overview
//!
//! Blocks are addressed by CID and written at most once. The importer only
//! ever talks to the [`DagService`] trait, so it is storage-agnostic. The
//! persistent implementation is [`SqliteDagStore`], with [`MemoryDagStore`]
//! for tests.
//!
//! ## Key Types
//!
//! - [`DagService`] - The async trait for block storage
//! - [`DagServiceExt`] - Node-level `persist` / `get_node` helpers
//! - [`SqliteDagStore`] - SQLite-based persistent storage
//! - [`MemoryDagStore`] - In-memory storage for tests
//! - [`InsertResult`] - Result of inserting a block
//!
//! ## Usage
//!
//! ```rust,no_run
//! use unixdag_store::{DagService, SqliteDagStore};
//!
//! async fn example() {
//!     let store = SqliteDagStore::open("blocks.db").unwrap();
//!     let blocks = store.block_count().await.unwrap();
//!     println!("{} blocks", blocks);
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Idempotent inserts**: Inserting the same block twice returns `AlreadyExists`
//! - **Inlined CIDs**: `persist` never writes blocks whose CID embeds the content
//! - **No deletion**: block lifecycle (GC) is outside this interface

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryDagStore;
pub use sqlite::SqliteDagStore;
pub use traits::{DagService, DagServiceExt, InsertResult};
