//! On-disk layout of a B+Tree node and its (de)serialization into a raw
//! page buffer.

use std::io::{Cursor, Read};

use crate::codec::{Decodeable, Encodeable};
use crate::config::{PageId, INVALID_PAGE_ID, PAGE_SIZE};
use crate::page::PageRef;
use crate::record::Record;

pub type Key = i32;

#[derive(Debug, Clone, PartialEq)]
pub struct LeafNode {
    pub keys: Vec<Key>,
    pub records: Vec<Record>,
    pub next_leaf: PageId,
}

impl LeafNode {
    pub fn empty() -> Self {
        Self {
            keys: Vec::new(),
            records: Vec::new(),
            next_leaf: INVALID_PAGE_ID,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InternalNode {
    pub keys: Vec<Key>,
    pub children: Vec<PageId>,
}

impl InternalNode {
    pub fn len(&self) -> usize {
        self.keys.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BTreeNode {
    Leaf(LeafNode),
    Internal(InternalNode),
}

impl BTreeNode {
    pub fn new_leaf() -> Self {
        BTreeNode::Leaf(LeafNode::empty())
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, BTreeNode::Leaf(_))
    }

    pub fn as_leaf(&self) -> &LeafNode {
        match self {
            BTreeNode::Leaf(leaf) => leaf,
            BTreeNode::Internal(_) => panic!("expected a leaf node"),
        }
    }

    pub fn as_leaf_mut(&mut self) -> &mut LeafNode {
        match self {
            BTreeNode::Leaf(leaf) => leaf,
            BTreeNode::Internal(_) => panic!("expected a leaf node"),
        }
    }

    pub fn as_internal(&self) -> &InternalNode {
        match self {
            BTreeNode::Internal(internal) => internal,
            BTreeNode::Leaf(_) => panic!("expected an internal node"),
        }
    }

    pub fn as_internal_mut(&mut self) -> &mut InternalNode {
        match self {
            BTreeNode::Internal(internal) => internal,
            BTreeNode::Leaf(_) => panic!("expected an internal node"),
        }
    }

    pub fn key_count(&self) -> usize {
        match self {
            BTreeNode::Leaf(leaf) => leaf.len(),
            BTreeNode::Internal(internal) => internal.len(),
        }
    }
}

impl Encodeable for BTreeNode {
    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PAGE_SIZE);
        match self {
            BTreeNode::Leaf(leaf) => {
                out.push(true as u8);
                out.extend((leaf.keys.len() as u64).encode());
                for key in &leaf.keys {
                    out.extend(key.encode());
                }
                for record in &leaf.records {
                    out.extend(record.encode());
                }
                out.extend(leaf.next_leaf.encode());
            }
            BTreeNode::Internal(internal) => {
                out.push(false as u8);
                out.extend((internal.keys.len() as u64).encode());
                for key in &internal.keys {
                    out.extend(key.encode());
                }
                for child in &internal.children {
                    out.extend(child.encode());
                }
            }
        }
        out
    }
}

impl Decodeable for BTreeNode {
    fn decode_from<R: Read>(reader: &mut R) -> Self {
        let is_leaf = bool::decode_from(reader);
        let key_count = u64::decode_from(reader) as usize;
        let keys: Vec<Key> = (0..key_count).map(|_| Key::decode_from(reader)).collect();

        if is_leaf {
            let records = (0..key_count).map(|_| Record::decode_from(reader)).collect();
            let next_leaf = PageId::decode_from(reader);
            BTreeNode::Leaf(LeafNode {
                keys,
                records,
                next_leaf,
            })
        } else {
            let children = (0..key_count + 1).map(|_| PageId::decode_from(reader)).collect();
            BTreeNode::Internal(InternalNode { keys, children })
        }
    }
}

/// Serializes `node` and writes it into `page`'s byte buffer, padding to
/// `PAGE_SIZE` with zeroes. Panics if the encoded node overflows a page;
/// this core has no overflow-page mechanism.
pub fn write_node_to_page(page: &PageRef, node: &BTreeNode) {
    let mut bytes = node.encode();
    assert!(
        bytes.len() <= PAGE_SIZE,
        "node does not fit in a single page: {} > {}",
        bytes.len(),
        PAGE_SIZE
    );
    bytes.resize(PAGE_SIZE, 0);
    page.borrow_mut().set_data(bytes);
}

/// Reads and decodes the node stored in `page`'s byte buffer.
pub fn decode_node(page: &PageRef) -> BTreeNode {
    let data = page.borrow().data().to_vec();
    let mut cursor = Cursor::new(data);
    BTreeNode::decode_from(&mut cursor)
}
