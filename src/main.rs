use log::info;

use paged_store::btree::BTree;
use paged_store::buffer::BufferPoolManager;
use paged_store::log::init_log;
use paged_store::record::{Record, Value};
use paged_store::storage::StorageManager;

/// Scripted smoke-test driver: wires the three layers together and
/// exercises an insert/search/range-scan/print cycle against a file in
/// the system temp directory. No parser, no catalog; see the crate
/// docs for the layers this wires up.
fn main() {
    init_log();

    let db_path = std::env::temp_dir().join("paged-store-demo.db");
    info!("opening storage at {}", db_path.display());

    let storage = StorageManager::new(&db_path).expect("failed to open backing file");
    let buffer_pool = BufferPoolManager::new(16, storage);
    let mut tree = BTree::new(buffer_pool);

    for key in [3, 1, 4, 1, 5, 9, 2, 6] {
        let record = Record::new(vec![
            Value::Int(key),
            Value::Text(format!("row-{}", key).into_bytes()),
        ]);
        let inserted = tree.insert(key, record);
        info!("insert({}) -> {}", key, inserted);
    }

    match tree.search(4) {
        Some(record) => info!("search(4) -> {:?}", record.values()),
        None => info!("search(4) -> not found"),
    }

    for record in tree.range_scan(i32::MIN, i32::MAX) {
        info!("scan: {:?}", record.values());
    }
}
