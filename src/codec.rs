//! Fixed-width, little-endian (de)serialization used by the record codec
//! and the B+Tree node serializer.
//!
//! `Encodeable`/`Decodeable` generalize to the closed set of wire widths
//! this core actually needs: fixed-width integers/floats plus the two
//! composite types built from them (`Record`, `BTreeNode`).

use std::io::Read;

pub trait Encodeable {
    fn encode(&self) -> Vec<u8>;
}

pub trait Decodeable: Sized {
    fn decode_from<R: Read>(reader: &mut R) -> Self;
}

/// Reads exactly `bytes_count` bytes, panicking on a short read. Node and
/// record bytes always come from a full, page-sized buffer, so a short
/// read here means the on-disk layout is corrupt, not that storage ran
/// out of bytes to give us.
pub fn read_exact<R: Read>(reader: &mut R, bytes_count: usize) -> Vec<u8> {
    let mut buffer = vec![0u8; bytes_count];
    reader
        .read_exact(&mut buffer)
        .unwrap_or_else(|e| panic!("corrupt page layout, expected {} bytes: {}", bytes_count, e));
    buffer
}

macro_rules! impl_serialization {
    (for $($t:ty),+) => {
        $(
            impl Encodeable for $t {
                fn encode(&self) -> Vec<u8> {
                    self.to_le_bytes().to_vec()
                }
            }

            impl Decodeable for $t {
                fn decode_from<R: Read>(reader: &mut R) -> Self {
                    let bytes = read_exact(reader, std::mem::size_of::<Self>());
                    Self::from_le_bytes(bytes.try_into().unwrap())
                }
            }
        )*
    }
}

impl_serialization!(for u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl Encodeable for bool {
    fn encode(&self) -> Vec<u8> {
        vec![*self as u8]
    }
}

impl Decodeable for bool {
    fn decode_from<R: Read>(reader: &mut R) -> Self {
        u8::decode_from(reader) == 1
    }
}
