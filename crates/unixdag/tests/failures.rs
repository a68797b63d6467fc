//! Import failures surface unmodified and leave earlier writes in place.

use std::io;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt, ReadBuf};
use unixdag::{
    Cid, DagNode, DagService, ImportConfig, ImportError, Importer, InsertResult, MemoryDagStore,
    StoreError,
};

fn config() -> ImportConfig {
    ImportConfig {
        chunk_size: 100,
        inline_limit: None,
        ..Default::default()
    }
}

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

async fn leaf(data: &[u8]) -> DagNode {
    Importer::new(config())
        .import(&MemoryDagStore::new(), data)
        .await
        .unwrap()
}

/// A stream whose peer went away.
struct DroppedConnection;

impl AsyncRead for DroppedConnection {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Poll::Ready(Err(io::Error::new(
            io::ErrorKind::ConnectionReset,
            "connection dropped",
        )))
    }
}

/// Accepts writes until the `fail_at`-th, which is refused.
struct FullDisk {
    inner: MemoryDagStore,
    writes: AtomicUsize,
    fail_at: usize,
}

impl FullDisk {
    fn new(fail_at: usize) -> Self {
        Self {
            inner: MemoryDagStore::new(),
            writes: AtomicUsize::new(0),
            fail_at,
        }
    }
}

#[async_trait]
impl DagService for FullDisk {
    async fn insert_block(&self, cid: &Cid, data: &[u8]) -> unixdag_store::Result<InsertResult> {
        if self.writes.fetch_add(1, Ordering::SeqCst) + 1 == self.fail_at {
            return Err(StoreError::Corrupt("disk full".into()));
        }
        self.inner.insert_block(cid, data).await
    }

    async fn get_block(&self, cid: &Cid) -> unixdag_store::Result<Option<Bytes>> {
        self.inner.get_block(cid).await
    }

    async fn has_block(&self, cid: &Cid) -> unixdag_store::Result<bool> {
        self.inner.has_block(cid).await
    }

    async fn block_count(&self) -> unixdag_store::Result<u64> {
        self.inner.block_count().await
    }
}

#[tokio::test]
async fn test_read_error_is_surfaced_unmodified() {
    let store = MemoryDagStore::new();
    let data = pattern(250);
    let reader = (&data[..]).chain(DroppedConnection);

    let err = Importer::new(config()).import(&store, reader).await.unwrap_err();
    assert_eq!(err.to_string(), "connection dropped");
    match err {
        ImportError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::ConnectionReset),
        other => panic!("expected an I/O error, got {other:?}"),
    }

    // The two complete leaves read before the failure stay stored.
    assert_eq!(store.block_count().await.unwrap(), 2);
    for chunk in data[..200].chunks(100) {
        assert!(store.has_block(leaf(chunk).await.cid()).await.unwrap());
    }
}

#[tokio::test]
async fn test_store_error_is_surfaced_unmodified() {
    let store = FullDisk::new(4);
    let data = pattern(500);

    let err = Importer::new(config()).import(&store, &data[..]).await.unwrap_err();
    assert_eq!(err.to_string(), "corrupt block database: disk full");
    assert!(!err.is_config());
    match err {
        ImportError::Store(StoreError::Corrupt(msg)) => assert_eq!(msg, "disk full"),
        other => panic!("expected a store error, got {other:?}"),
    }

    // Leaves written before the refused write are not retracted.
    assert_eq!(store.block_count().await.unwrap(), 3);
    for chunk in data[..300].chunks(100) {
        assert!(store.has_block(leaf(chunk).await.cid()).await.unwrap());
    }
    assert!(!store.has_block(leaf(&data[300..400]).await.cid()).await.unwrap());
}
