//! The tuple type stored in B+Tree leaves: a closed, tagged union of
//! values serialized as `value_count` followed by tag+payload pairs.
//! `Record`/`Value` is a single flat pair rather than a separate
//! tuple/field-schema split, since this core has no catalog of column
//! types to cross-check against.

use std::io::Read;

use crate::codec::{read_exact, Decodeable, Encodeable};

const TAG_INT: u8 = 0;
const TAG_DOUBLE: u8 = 1;
const TAG_TEXT: u8 = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Double(f64),
    Text(Vec<u8>),
}

impl Encodeable for Value {
    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        match self {
            Value::Int(v) => {
                out.push(TAG_INT);
                out.extend(v.encode());
            }
            Value::Double(v) => {
                out.push(TAG_DOUBLE);
                out.extend(v.encode());
            }
            Value::Text(bytes) => {
                out.push(TAG_TEXT);
                out.extend((bytes.len() as u64).encode());
                out.extend_from_slice(bytes);
            }
        }
        out
    }
}

impl Decodeable for Value {
    fn decode_from<R: Read>(reader: &mut R) -> Self {
        let tag = u8::decode_from(reader);
        match tag {
            TAG_INT => Value::Int(i32::decode_from(reader)),
            TAG_DOUBLE => Value::Double(f64::decode_from(reader)),
            TAG_TEXT => {
                let len = u64::decode_from(reader) as usize;
                Value::Text(read_exact(reader, len))
            }
            other => panic!("unknown value tag: {}", other),
        }
    }
}

impl Value {
    /// Encoded size in bytes, including the tag byte. Used by callers
    /// deciding whether a record still fits in a leaf page.
    pub fn get_size(&self) -> usize {
        match self {
            Value::Int(_) => 1 + 4,
            Value::Double(_) => 1 + 8,
            Value::Text(bytes) => 1 + 8 + bytes.len(),
        }
    }
}

/// An ordered sequence of values, keyed externally by the B+Tree (the
/// key is not itself a `Value` in this core - see `config::PageId` and
/// `btree::node` for the `i32` key type used throughout).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    values: Vec<Value>,
}

impl Record {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn get_size(&self) -> usize {
        8 + self.values.iter().map(Value::get_size).sum::<usize>()
    }
}

impl Encodeable for Record {
    fn encode(&self) -> Vec<u8> {
        let mut out = (self.values.len() as u64).encode();
        for value in &self.values {
            out.extend(value.encode());
        }
        out
    }
}

impl Decodeable for Record {
    fn decode_from<R: Read>(reader: &mut R) -> Self {
        let count = u64::decode_from(reader) as usize;
        let values = (0..count).map(|_| Value::decode_from(reader)).collect();
        Record::new(values)
    }
}
