use paged_store::record::{Record, Value};

mod common;

fn record_for(key: i32) -> Record {
    Record::new(vec![Value::Int(key)])
}

#[test]
fn deleting_a_present_key_removes_it_and_nothing_else() {
    let (_dir, mut tree) = common::setup_tree(16);
    for key in [5, 15, 25] {
        tree.insert(key, record_for(key));
    }

    assert!(tree.delete(15));
    assert_eq!(tree.search(15), None);
    assert_eq!(tree.search(5), Some(record_for(5)));
    assert_eq!(tree.search(25), Some(record_for(25)));
}

#[test]
fn deleting_an_absent_key_fails_and_changes_nothing() {
    let (_dir, mut tree) = common::setup_tree(16);
    tree.insert(1, record_for(1));

    assert!(!tree.delete(999));
    assert_eq!(tree.search(1), Some(record_for(1)));
}

#[test]
fn deleting_across_a_split_leaf_boundary_leaves_remaining_keys_intact() {
    let (_dir, mut tree) = common::setup_tree(4);
    for key in 0..40 {
        tree.insert(key, record_for(key));
    }

    for key in (0..40).step_by(2) {
        assert!(tree.delete(key));
    }

    for key in 0..40 {
        if key % 2 == 0 {
            assert_eq!(tree.search(key), None, "key {} should have been deleted", key);
        } else {
            assert_eq!(tree.search(key), Some(record_for(key)), "key {} should remain", key);
        }
    }
}

#[test]
fn delete_then_reinsert_same_key_succeeds() {
    let (_dir, mut tree) = common::setup_tree(16);
    tree.insert(7, record_for(7));
    assert!(tree.delete(7));

    let replacement = Record::new(vec![Value::Int(7), Value::Text(b"replacement".to_vec())]);
    assert!(tree.insert(7, replacement.clone()));
    assert_eq!(tree.search(7), Some(replacement));
}
