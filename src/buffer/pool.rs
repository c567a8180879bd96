use std::collections::{HashMap, VecDeque};

use log::{debug, warn};

use crate::config::PageId;
use crate::page::{page_ref, Page, PageRef};
use crate::storage::StorageManager;

/// A slot in the buffer pool. Owns at most one `Page` (via the shared
/// `PageRef` handle also held by whoever last fetched it) plus the
/// pin/dirty bookkeeping, which lives on the frame, not the page.
struct Frame {
    page: Option<PageRef>,
    pin_count: u32,
    dirty: bool,
}

impl Frame {
    fn empty() -> Self {
        Self {
            page: None,
            pin_count: 0,
            dirty: false,
        }
    }
}

/// Bounded set of in-memory page frames, caching pages read from a
/// `StorageManager`, enforcing the pin/unpin contract, and evicting cold
/// pages via LRU when full.
pub struct BufferPoolManager {
    storage: StorageManager,
    frames: Vec<Frame>,
    page_table: HashMap<PageId, usize>,
    free_list: VecDeque<usize>,
    /// Frame indices of all resident frames (pinned or not). Front is
    /// most-recently-used, back is least-recently-used.
    lru: VecDeque<usize>,
}

impl BufferPoolManager {
    pub fn new(pool_size: usize, storage: StorageManager) -> Self {
        let frames = (0..pool_size).map(|_| Frame::empty()).collect();
        let free_list = (0..pool_size).collect();
        Self {
            storage,
            frames,
            page_table: HashMap::new(),
            free_list,
            lru: VecDeque::new(),
        }
    }

    pub fn pool_size(&self) -> usize {
        self.frames.len()
    }

    /// Fetches `page_id`, pinning it. Returns `None` only when the page
    /// is not already resident and no frame can be freed for it.
    pub fn fetch_page(&mut self, page_id: PageId) -> Option<PageRef> {
        if let Some(&idx) = self.page_table.get(&page_id) {
            self.frames[idx].pin_count += 1;
            self.touch_mru(idx);
            debug!("fetch_page({}): cache hit, pin_count={}", page_id, self.frames[idx].pin_count);
            return self.frames[idx].page.clone();
        }

        let idx = self.evict_frame()?;

        let bytes = match self.storage.read_page(page_id) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("fetch_page({}): read failed: {}", page_id, e);
                self.free_list.push_back(idx);
                return None;
            }
        };

        let page = page_ref(Page::new(page_id, bytes));
        self.frames[idx] = Frame {
            page: Some(page.clone()),
            pin_count: 1,
            dirty: false,
        };
        self.page_table.insert(page_id, idx);
        self.lru.push_front(idx);
        debug!("fetch_page({}): loaded from storage into frame {}", page_id, idx);

        Some(page)
    }

    /// Decrements `page_id`'s pin count, OR-ing `dirty_hint` into the
    /// frame's sticky dirty flag. Fails if the page is not resident or
    /// already unpinned.
    pub fn unpin_page(&mut self, page_id: PageId, dirty_hint: bool) -> bool {
        let idx = match self.page_table.get(&page_id) {
            Some(&idx) => idx,
            None => return false,
        };

        let frame = &mut self.frames[idx];
        if frame.pin_count == 0 {
            return false;
        }

        frame.pin_count -= 1;
        frame.dirty |= dirty_hint;

        if frame.pin_count == 0 {
            self.move_to_lru_back(idx);
        }

        true
    }

    /// Allocates a fresh page id, installs a zeroed page pinned and
    /// dirty. Returns `None` when no victim frame is available.
    pub fn new_page(&mut self) -> Option<(PageId, PageRef)> {
        let idx = self.evict_frame()?;

        let page_id = self.storage.allocate_page();
        let page = page_ref(Page::zeroed(page_id));
        self.frames[idx] = Frame {
            page: Some(page.clone()),
            pin_count: 1,
            dirty: true,
        };
        self.page_table.insert(page_id, idx);
        self.lru.push_front(idx);
        debug!("new_page(): allocated page {} in frame {}", page_id, idx);

        Some((page_id, page))
    }

    /// Writes `page_id` to storage if resident, clearing its dirty flag.
    pub fn flush_page(&mut self, page_id: PageId) -> bool {
        let idx = match self.page_table.get(&page_id) {
            Some(&idx) => idx,
            None => return false,
        };
        self.flush_frame(idx).is_ok()
    }

    /// Removes `page_id` from the pool. A no-op success if it is not
    /// resident; fails if it is resident and pinned.
    pub fn delete_page(&mut self, page_id: PageId) -> bool {
        let idx = match self.page_table.get(&page_id) {
            Some(&idx) => idx,
            None => return true,
        };

        if self.frames[idx].pin_count > 0 {
            return false;
        }

        self.page_table.remove(&page_id);
        self.lru.retain(|&i| i != idx);
        self.frames[idx] = Frame::empty();
        self.free_list.push_back(idx);
        true
    }

    /// Obtains a frame ready for reuse: prefers the free list, otherwise
    /// scans the LRU list from least- to most-recently-used for the
    /// first unpinned frame, flushing it first if dirty.
    fn evict_frame(&mut self) -> Option<usize> {
        if let Some(idx) = self.free_list.pop_front() {
            return Some(idx);
        }

        let idx = self.find_lru_victim()?;
        self.lru.retain(|&i| i != idx);

        if self.frames[idx].dirty {
            if self.flush_frame(idx).is_err() {
                // Leave the frame as-is; the caller treats this as "no
                // victim available" rather than silently losing data.
                self.lru.push_back(idx);
                return None;
            }
        }

        if let Some(old_page) = self.frames[idx].page.take() {
            let old_id = old_page.borrow().page_id();
            self.page_table.remove(&old_id);
        }

        Some(idx)
    }

    fn find_lru_victim(&self) -> Option<usize> {
        // `lru` is ordered MRU-first, so scanning back-to-front visits
        // least-recently-used frames first.
        self.lru
            .iter()
            .rev()
            .copied()
            .find(|&idx| self.frames[idx].pin_count == 0)
    }

    fn flush_frame(&mut self, idx: usize) -> crate::error::StorageResult<()> {
        let page = match &self.frames[idx].page {
            Some(page) => page.clone(),
            None => return Ok(()),
        };

        let page = page.borrow();
        self.storage.write_page(page.page_id(), page.data())?;
        drop(page);
        self.frames[idx].dirty = false;
        Ok(())
    }

    fn touch_mru(&mut self, idx: usize) {
        self.lru.retain(|&i| i != idx);
        self.lru.push_front(idx);
    }

    fn move_to_lru_back(&mut self, idx: usize) {
        self.lru.retain(|&i| i != idx);
        self.lru.push_back(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PAGE_SIZE;
    use tempdir::TempDir;

    fn pool(pool_size: usize) -> (TempDir, BufferPoolManager) {
        let dir = TempDir::new("buffer_pool_test").unwrap();
        let storage = StorageManager::new(dir.path().join("db")).unwrap();
        (dir, BufferPoolManager::new(pool_size, storage))
    }

    #[test]
    fn new_page_is_pinned_and_dirty() {
        let (_dir, mut bpm) = pool(4);
        let (id, _page) = bpm.new_page().unwrap();
        // A second unpin would fail because pin_count would underflow;
        // a single unpin should succeed exactly once.
        assert!(bpm.unpin_page(id, false));
        assert!(!bpm.unpin_page(id, false));
    }

    #[test]
    fn fetch_page_returns_none_when_pool_is_full_of_pinned_pages() {
        let (_dir, mut bpm) = pool(2);
        let (a, _) = bpm.new_page().unwrap();
        let (b, _) = bpm.new_page().unwrap();
        assert_ne!(a, b);

        // Both frames are pinned; fetching a third page must fail.
        assert!(bpm.fetch_page(999).is_none());
    }

    #[test]
    fn unpinning_frees_a_victim_for_subsequent_fetch() {
        let (_dir, mut bpm) = pool(2);
        let (a, _) = bpm.new_page().unwrap();
        let (b, _) = bpm.new_page().unwrap();
        bpm.unpin_page(a, true);

        // b is still pinned, a is not: a new page should succeed and
        // evict a's frame (flushing it, since it was marked dirty).
        let (c, _) = bpm.new_page().expect("a's frame should be reusable");
        assert!(c != a && c != b);

        // a was flushed on eviction, so re-fetching it returns the
        // zeroed page written when it was allocated.
        let refetched = bpm.fetch_page(a).expect("a should be readable from storage");
        assert_eq!(refetched.borrow().data(), vec![0u8; PAGE_SIZE].as_slice());
    }

    #[test]
    fn lru_evicts_least_recently_unpinned_frame() {
        let (_dir, mut bpm) = pool(2);
        let (a, _) = bpm.new_page().unwrap();
        let (b, _) = bpm.new_page().unwrap();
        bpm.unpin_page(a, true);
        bpm.unpin_page(b, true);

        // Touch a again, making b the least-recently-used.
        bpm.fetch_page(a).unwrap();
        bpm.unpin_page(a, false);

        let (c, _) = bpm.new_page().unwrap();
        assert!(bpm.fetch_page(b).is_none() || c != b);
        // b's frame was reused: b must now be absent from the pool.
        assert!(!bpm.flush_page(b));
    }

    #[test]
    fn eviction_flushes_dirty_victim_byte_identically() {
        let (_dir, mut bpm) = pool(2);
        let (a, page) = bpm.new_page().unwrap();
        page.borrow_mut().set_data({
            let mut d = vec![0u8; PAGE_SIZE];
            d[10] = 42;
            d
        });
        bpm.unpin_page(a, true);

        let (_b, _) = bpm.new_page().unwrap();
        let (_c, _) = bpm.new_page().unwrap(); // forces eviction of a

        let refetched = bpm.fetch_page(a).unwrap();
        assert_eq!(refetched.borrow().data()[10], 42);
    }

    #[test]
    fn delete_page_fails_while_pinned_and_succeeds_once_unpinned() {
        let (_dir, mut bpm) = pool(4);
        let (id, _) = bpm.new_page().unwrap();
        assert!(!bpm.delete_page(id));
        bpm.unpin_page(id, false);
        assert!(bpm.delete_page(id));
        assert!(bpm.delete_page(id)); // no-op on already-absent page
    }

    #[test]
    fn unpin_unknown_page_fails() {
        let (_dir, mut bpm) = pool(2);
        assert!(!bpm.unpin_page(123, false));
    }

    #[test]
    fn flush_page_clears_dirty_without_unpinning() {
        let (_dir, mut bpm) = pool(2);
        let (id, page) = bpm.new_page().unwrap();
        page.borrow_mut().set_data(vec![7u8; PAGE_SIZE]);
        assert!(bpm.flush_page(id));

        let reread = bpm.storage.read_page(id).unwrap();
        assert_eq!(reread, vec![7u8; PAGE_SIZE]);
    }
}
