//! Constants shared by every layer of the core.

/// Size, in bytes, of every page moved between the buffer pool and the
/// backing file. Fixed: this core does not support variable page sizes.
pub const PAGE_SIZE: usize = 4096;

/// B+Tree order: a node splits once it would hold `BTREE_ORDER` or more
/// keys. Leaves split when inserting into a leaf already holding
/// `BTREE_ORDER - 1` keys.
pub const BTREE_ORDER: usize = 4;

/// Page identifiers are unsigned 32-bit integers; page id 0 is valid.
pub type PageId = u32;

/// Sentinel meaning "no page" - all-ones bits, i.e. `u32::MAX`.
pub const INVALID_PAGE_ID: PageId = PageId::MAX;
