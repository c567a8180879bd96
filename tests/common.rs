use paged_store::{btree::BTree, buffer::BufferPoolManager, log::init_log, storage::StorageManager};
use tempdir::TempDir;

/// Initializes logging once per test binary and opens a fresh tree
/// backed by a temp-directory file, mirroring how the rest of the pack
/// sets up a throwaway table per test.
pub fn setup_tree(pool_size: usize) -> (TempDir, BTree) {
    init_log_once();

    let dir = TempDir::new("paged_store_integration").unwrap();
    let storage = StorageManager::new(dir.path().join("db")).unwrap();
    let buffer_pool = BufferPoolManager::new(pool_size, storage);
    (dir, BTree::new(buffer_pool))
}

fn init_log_once() {
    use std::sync::Once;
    static ONCE: Once = Once::new();
    ONCE.call_once(init_log);
}
