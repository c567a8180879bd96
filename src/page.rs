use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{PageId, PAGE_SIZE};

/// A fixed-size, opaque byte buffer tagged with its page identifier.
///
/// `Page` carries no pin count or dirty flag of its own - that
/// bookkeeping belongs to the buffer pool's `Frame` (the dirty flag
/// rides on the frame, not on the page object). `Page` only ever exists
/// inside a `Frame`, reachable through the `PageRef` handle the buffer
/// pool hands out.
pub struct Page {
    page_id: PageId,
    data: Vec<u8>,
}

impl Page {
    pub fn new(page_id: PageId, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), PAGE_SIZE, "page buffer must be exactly PAGE_SIZE bytes");
        Self { page_id, data }
    }

    pub fn zeroed(page_id: PageId) -> Self {
        Self::new(page_id, vec![0u8; PAGE_SIZE])
    }

    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn set_data(&mut self, data: Vec<u8>) {
        debug_assert_eq!(data.len(), PAGE_SIZE, "page buffer must be exactly PAGE_SIZE bytes");
        self.data = data;
    }
}

/// Non-owning, clonable reference to a resident page.
///
/// The buffer pool is single-threaded, so an `Rc<RefCell<_>>` handle -
/// rather than a thread-safe `Arc<RwLock<_>>` - is the right
/// shared-mutability tool here. Holding a `PageRef` does not by itself
/// keep the page pinned; callers still must balance every
/// `fetch_page`/`new_page` with exactly one `unpin_page`.
pub type PageRef = Rc<RefCell<Page>>;

pub fn page_ref(page: Page) -> PageRef {
    Rc::new(RefCell::new(page))
}
