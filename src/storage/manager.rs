use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::{debug, warn};

use crate::config::{PageId, PAGE_SIZE};
use crate::error::StorageResult;

/// Owns a single backing file and translates between `(page_id, bytes)`
/// and byte offsets in that file. Page `n` occupies
/// `[n * PAGE_SIZE, (n + 1) * PAGE_SIZE)`; no header or free list is
/// persisted.
pub struct StorageManager {
    file: File,
    next_page_id: PageId,
}

impl StorageManager {
    /// Opens (creating if absent) the backing file and seeds the next-id
    /// counter from its current length.
    pub fn new<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;

        let len = file.metadata()?.len();
        let next_page_id = (len / PAGE_SIZE as u64) as PageId;
        debug!("opened storage file, next_page_id: {}", next_page_id);

        Ok(Self { file, next_page_id })
    }

    /// Reads exactly `PAGE_SIZE` bytes for `page_id`. A short read (the
    /// page lies past the current end of file) is tolerated: the
    /// remainder of the buffer stays zero-filled and a warning is logged,
    /// rather than the read failing observably.
    pub fn read_page(&mut self, page_id: PageId) -> StorageResult<Vec<u8>> {
        let offset = page_id as u64 * PAGE_SIZE as u64;
        self.file.seek(SeekFrom::Start(offset))?;

        let mut buf = vec![0u8; PAGE_SIZE];
        let read = read_as_much_as_possible(&mut self.file, &mut buf)?;
        if read < PAGE_SIZE {
            warn!(
                "short read for page {}: got {} of {} bytes, zero-filling remainder",
                page_id, read, PAGE_SIZE
            );
        }

        Ok(buf)
    }

    /// Writes exactly `PAGE_SIZE` bytes for `page_id` and flushes.
    pub fn write_page(&mut self, page_id: PageId, data: &[u8]) -> StorageResult<()> {
        debug_assert_eq!(data.len(), PAGE_SIZE);
        let offset = page_id as u64 * PAGE_SIZE as u64;
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(data)?;
        self.file.flush()?;
        debug!("wrote page {} ({} bytes)", page_id, data.len());
        Ok(())
    }

    /// Returns the next unused page id and bumps the counter. Purely
    /// logical: no bytes are written until a later `write_page`.
    pub fn allocate_page(&mut self) -> PageId {
        let id = self.next_page_id;
        self.next_page_id += 1;
        id
    }
}

/// Reads until `buf` is full or EOF is reached, unlike `read_exact`
/// (which errors on a short read). Past-end-of-file pages are a normal
/// occurrence for a freshly allocated page whose bytes have not been
/// flushed yet.
fn read_as_much_as_possible(file: &mut File, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match file.read(&mut buf[total..])? {
            0 => break,
            n => total += n,
        }
    }
    Ok(total)
}
