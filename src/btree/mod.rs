mod node;
mod tree;

pub use node::{decode_node, write_node_to_page, BTreeNode, InternalNode, Key, LeafNode};
pub use tree::BTree;
