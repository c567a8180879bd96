use std::{error::Error, fmt, io};

/// Error taxonomy for the paged storage core.
///
/// Every public operation on `StorageManager`, `BufferPoolManager` and
/// `BTree` reports failure through a plain `bool`/`Option`, per the
/// single-threaded, no-retry propagation policy of this core. This enum
/// exists so the *internal* plumbing (and anything embedding this crate
/// that wants to know *why* an operation failed) has a real error type to
/// work with, instead of a bare `bool`.
#[derive(Debug)]
pub enum StorageError {
    /// Operation targeted a page id not currently held by any frame.
    NotResident,
    /// Operation required an unpinned frame, or targeted a pinned page,
    /// but none was available.
    Pinned,
    /// `Insert` invoked with a key already present in the tree.
    DuplicateKey,
    /// `Search`/`Delete` invoked with a key not present in the tree.
    NotFound,
    /// The underlying file read or write failed.
    Io(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StorageError::NotResident => write!(f, "page is not resident in the buffer pool"),
            StorageError::Pinned => write!(f, "no unpinned frame is available"),
            StorageError::DuplicateKey => write!(f, "key already exists"),
            StorageError::NotFound => write!(f, "key not found"),
            StorageError::Io(e) => write!(f, "io error: {}", e),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        StorageError::Io(e)
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
