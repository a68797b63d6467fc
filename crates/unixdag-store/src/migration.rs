//! Schema versioning for the SQLite block database.
//!
//! The schema version lives in SQLite's `user_version` pragma. Each entry of
//! [`MIGRATIONS`] upgrades the schema by exactly one version and all pending
//! entries run in a single transaction.

use rusqlite::Connection;

use crate::error::{Result, StoreError};

/// Upgrade scripts; entry `i` moves the schema from version `i` to `i + 1`.
const MIGRATIONS: &[&str] = &[
    // v1: content-addressed blocks.
    r#"
    CREATE TABLE blocks (
        cid BLOB PRIMARY KEY,           -- binary CID
        codec INTEGER NOT NULL,         -- multicodec of the block
        data BLOB NOT NULL,             -- encoded node
        size INTEGER NOT NULL,          -- length of data
        inserted_at INTEGER NOT NULL    -- Unix ms
    );
    CREATE INDEX idx_blocks_codec ON blocks(codec);
    "#,
];

/// Schema version this build writes.
pub const CURRENT_VERSION: u32 = MIGRATIONS.len() as u32;

/// Read the schema version of an open database.
pub fn schema_version(conn: &Connection) -> Result<u32> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

/// Bring the schema up to [`CURRENT_VERSION`]. Safe to run on every open.
pub fn migrate(conn: &mut Connection) -> Result<()> {
    let found = schema_version(conn)?;
    if found > CURRENT_VERSION {
        return Err(StoreError::SchemaTooNew {
            found,
            supported: CURRENT_VERSION,
        });
    }
    if found == CURRENT_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (index, script) in MIGRATIONS.iter().enumerate().skip(found as usize) {
        tx.execute_batch(script)?;
        tracing::debug!(version = index + 1, "applied schema migration");
    }
    tx.pragma_update(None, "user_version", CURRENT_VERSION)?;
    tx.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_database_is_migrated() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(schema_version(&conn).unwrap(), 0);
        migrate(&mut conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), CURRENT_VERSION);

        let has_blocks: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = 'blocks'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(has_blocks);
    }

    #[test]
    fn test_migrate_twice_is_noop() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate(&mut conn).unwrap();
        conn.execute(
            "INSERT INTO blocks (cid, codec, data, size, inserted_at) VALUES (x'01', 85, x'', 0, 0)",
            [],
        )
        .unwrap();

        migrate(&mut conn).unwrap();
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM blocks", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_newer_schema_rejected() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", CURRENT_VERSION + 1)
            .unwrap();

        assert!(matches!(
            migrate(&mut conn),
            Err(StoreError::SchemaTooNew { found, .. }) if found == CURRENT_VERSION + 1
        ));
    }
}
