//! End-to-end import tests against the in-memory and SQLite stores.

use unixdag::{
    import_file, read_file, try_extract_fs_node, Cid, DagNode, DagService, DagServiceExt,
    ExtractError, ImportConfig, Importer, MemoryDagStore, NodeKind, SqliteDagStore,
};

const MIB: usize = 1024 * 1024;

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

/// Every node position in the tree under `root`, in depth-first order.
/// Repeated content is visited once per link.
async fn walk<D: DagService>(store: &D, root: &Cid) -> Vec<DagNode> {
    let mut stack = vec![*root];
    let mut nodes = Vec::new();
    while let Some(cid) = stack.pop() {
        let node = store.get_node(&cid).await.unwrap().expect("reachable node must resolve");
        stack.extend(node.links().iter().rev().map(|l| l.cid));
        nodes.push(node);
    }
    nodes
}

fn leaf_count(nodes: &[DagNode]) -> usize {
    nodes.iter().filter(|n| n.links().is_empty()).count()
}

#[tokio::test]
async fn test_whole_chunks_give_one_leaf_each() {
    let store = MemoryDagStore::new();
    let data = pattern(3 * MIB);
    let root = import_file(&store, &data[..]).await.unwrap();

    let nodes = walk(&store, root.cid()).await;
    assert_eq!(root.links().len(), 3);
    assert_eq!(leaf_count(&nodes), 3);
    for node in nodes.iter().filter(|n| n.links().is_empty()) {
        assert_eq!(node.kind(), NodeKind::Raw);
        assert_eq!(node.size(), MIB as u64);
    }
}

#[tokio::test]
async fn test_input_below_chunk_size_is_one_leaf() {
    let store = MemoryDagStore::new();
    let data = pattern(MIB - 1);
    let root = import_file(&store, &data[..]).await.unwrap();

    assert_eq!(root.kind(), NodeKind::Raw);
    assert_eq!(root.size(), (MIB - 1) as u64);
    assert_eq!(store.block_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_fanout_never_exceeded() {
    let store = MemoryDagStore::new();
    let importer = Importer::new(ImportConfig {
        chunk_size: 16,
        ..Default::default()
    });
    let data = pattern(1025 * 16);
    let root = importer.import(&store, &data[..]).await.unwrap();

    let nodes = walk(&store, root.cid()).await;
    assert!(nodes.iter().all(|n| n.links().len() <= 1024));
    assert_eq!(root.links().len(), 2);
    assert_eq!(nodes[1].links().len(), 1024);
    assert_eq!(leaf_count(&nodes), 1025);
}

#[tokio::test]
async fn test_small_fanout_depth() {
    let store = MemoryDagStore::new();
    let importer = Importer::new(ImportConfig {
        chunk_size: 8,
        max_links: 2,
        ..Default::default()
    });
    // 8 leaves with fanout 2 is a perfect tree of depth 3.
    let data = pattern(64);
    let root = importer.import(&store, &data[..]).await.unwrap();
    let nodes = walk(&store, root.cid()).await;

    assert_eq!(leaf_count(&nodes), 8);
    assert_eq!(nodes.len(), 15);
    assert!(nodes.iter().all(|n| n.links().len() <= 2));
    assert_eq!(read_file(&store, root.cid()).await.unwrap(), data);
}

#[tokio::test]
async fn test_empty_input_is_deterministic() {
    let store = MemoryDagStore::new();
    let a = import_file(&store, &b""[..]).await.unwrap();
    let b = import_file(&store, &b""[..]).await.unwrap();

    assert_eq!(a.cid(), b.cid());
    assert_eq!(a.cid().to_string(), "bafkqaaa");
    assert_eq!(a.kind(), NodeKind::Raw);

    let framed = Importer::new(ImportConfig {
        raw_leaves: false,
        ..Default::default()
    })
    .import(&store, &b""[..])
    .await
    .unwrap();
    assert_eq!(framed.cid().to_string(), "bafyaabqkaqeaegaa");
    assert_eq!(try_extract_fs_node(&framed).unwrap().file_size(), 0);
}

#[tokio::test]
async fn test_reimport_same_root() {
    let data = pattern(2 * MIB + 123);

    let first = MemoryDagStore::new();
    let a = import_file(&first, &data[..]).await.unwrap();

    let second = MemoryDagStore::new();
    let b = import_file(&second, &data[..]).await.unwrap();
    let again = import_file(&second, &data[..]).await.unwrap();

    assert_eq!(a.cid(), b.cid());
    assert_eq!(b.cid(), again.cid());
    assert_eq!(
        first.block_count().await.unwrap(),
        second.block_count().await.unwrap()
    );
}

#[tokio::test]
async fn test_inlining_threshold() {
    let store = MemoryDagStore::new();

    let small = import_file(&store, &[7u8; 32][..]).await.unwrap();
    assert!(small.is_inlined());
    assert_eq!(store.block_count().await.unwrap(), 0);
    assert_eq!(store.get_node(small.cid()).await.unwrap().unwrap(), small);

    let large = import_file(&store, &[7u8; 33][..]).await.unwrap();
    assert!(!large.is_inlined());
    assert_eq!(store.block_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_extract_round_trip() {
    let store = MemoryDagStore::new();

    // Multi-chunk file: proto root reports the full size.
    let data = pattern(2 * MIB + 5);
    let root = import_file(&store, &data[..]).await.unwrap();
    let fs = try_extract_fs_node(&root).unwrap();
    assert_eq!(fs.file_size(), data.len() as u64);
    assert_eq!(fs.block_sizes(), &[MIB as u64, MIB as u64, 5]);

    // Single chunk with raw leaves: the root is a raw leaf.
    let leaf = import_file(&store, &data[..1000]).await.unwrap();
    assert!(matches!(
        try_extract_fs_node(&leaf),
        Err(ExtractError::RawLeaf { .. })
    ));
    assert_eq!(leaf.size(), 1000);

    // Raw leaves disabled: always a proto root.
    let framed = Importer::new(ImportConfig {
        raw_leaves: false,
        ..Default::default()
    })
    .import(&store, &data[..1000])
    .await
    .unwrap();
    assert_eq!(try_extract_fs_node(&framed).unwrap().file_size(), 1000);
}

#[tokio::test]
async fn test_cid_v0_known_answer() {
    let store = MemoryDagStore::new();
    let importer = Importer::new(ImportConfig {
        cid_version: 0,
        raw_leaves: false,
        inline_limit: None,
        ..Default::default()
    });

    let empty = importer.import(&store, &b""[..]).await.unwrap();
    assert_eq!(
        empty.cid().to_string(),
        "QmbFMke1KXqnYyBBWxB74N4c5SBnJMVAiMNRcGu6x1AwQH"
    );

    let hello = importer.import(&store, &b"hello world"[..]).await.unwrap();
    assert_eq!(
        hello.cid().to_string(),
        "Qmf412jQZiuVUtdgnB36FXFX7xg5V6KEbSJ4dpQuhkLyfD"
    );
}

#[tokio::test]
async fn test_sqlite_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blocks.db");
    let data = pattern(MIB + MIB / 2);

    let root_cid = {
        let store = SqliteDagStore::open(&path).unwrap();
        let root = import_file(&store, &data[..]).await.unwrap();
        assert_eq!(store.block_count().await.unwrap(), 3);
        *root.cid()
    };

    let store = SqliteDagStore::open(&path).unwrap();
    assert_eq!(read_file(&store, &root_cid).await.unwrap(), data);

    let root = store.get_node(&root_cid).await.unwrap().unwrap();
    assert_eq!(try_extract_fs_node(&root).unwrap().file_size(), data.len() as u64);
}

#[tokio::test]
async fn test_import_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.bin");
    let data = pattern(300_000);
    tokio::fs::write(&path, &data).await.unwrap();

    let store = MemoryDagStore::new();
    let file = tokio::fs::File::open(&path).await.unwrap();
    let from_file = Importer::new(ImportConfig {
        chunk_size: 65_536,
        ..Default::default()
    })
    .import(&store, file)
    .await
    .unwrap();

    let from_memory = Importer::new(ImportConfig {
        chunk_size: 65_536,
        ..Default::default()
    })
    .import(&store, &data[..])
    .await
    .unwrap();

    assert_eq!(from_file.cid(), from_memory.cid());
    assert_eq!(from_file.links().len(), 5);
}
