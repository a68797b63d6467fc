//! SQLite block store.
//!
//! Backed by rusqlite with bundled SQLite. The connection is blocking, so
//! each call is handed to tokio's blocking pool and awaited.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use rusqlite::{params, Connection, OptionalExtension};
use unixdag_core::Cid;

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{DagService, InsertResult};

/// Persistent block store in a single SQLite file.
///
/// Cloning shares the underlying connection.
#[derive(Clone)]
pub struct SqliteDagStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteDagStore {
    /// Open (or create) the block database at `path`, upgrading its schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let store = Self::with_connection(Connection::open(path.as_ref())?)?;
        tracing::debug!(path = %path.as_ref().display(), "opened block database");
        Ok(store)
    }

    /// A private database that lives as long as the store.
    pub fn open_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(mut conn: Connection) -> Result<Self> {
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking pool.
    async fn call<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| StoreError::LockPoisoned)?;
            f(&guard)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

#[async_trait]
impl DagService for SqliteDagStore {
    async fn insert_block(&self, cid: &Cid, data: &[u8]) -> Result<InsertResult> {
        let key = cid.to_bytes();
        let codec = cid.codec() as i64;
        let data = data.to_vec();

        self.call(move |conn| {
            let size = data.len() as i64;
            let changed = conn
                .prepare_cached(
                    "INSERT OR IGNORE INTO blocks (cid, codec, data, size, inserted_at)
                     VALUES (?1, ?2, ?3, ?4, CAST((julianday('now') - 2440587.5) * 86400000 AS INTEGER))",
                )?
                .execute(params![key, codec, data, size])?;

            Ok(match changed {
                0 => InsertResult::AlreadyExists,
                _ => InsertResult::Inserted,
            })
        })
        .await
    }

    async fn get_block(&self, cid: &Cid) -> Result<Option<Bytes>> {
        let key = cid.to_bytes();

        self.call(move |conn| {
            let data = conn
                .prepare_cached("SELECT data FROM blocks WHERE cid = ?1")?
                .query_row(params![key], |row| row.get::<_, Vec<u8>>(0))
                .optional()?;
            Ok(data.map(Bytes::from))
        })
        .await
    }

    async fn has_block(&self, cid: &Cid) -> Result<bool> {
        let key = cid.to_bytes();

        self.call(move |conn| {
            let mut stmt = conn.prepare_cached("SELECT 1 FROM blocks WHERE cid = ?1")?;
            Ok(stmt.exists(params![key])?)
        })
        .await
    }

    async fn block_count(&self) -> Result<u64> {
        self.call(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM blocks", [], |row| row.get(0))?;
            u64::try_from(count).map_err(|_| StoreError::Corrupt(format!("negative block count {}", count)))
        })
        .await
    }
}
