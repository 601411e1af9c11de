//! Growable input buffer with compaction.
//!
//! The buffer owns one contiguous allocation split into three regions:
//!
//! ```text
//!   0          consumed          size            size + free
//!   |-- parsed --|-- unconsumed --|----- free -----|
//! ```
//!
//! Invariant: `consumed <= size` and `size + free == storage.len()`.
//!
//! Space is reclaimed lazily by [`GrowableBuffer::reserve`]:
//! - when everything has been consumed, the regions are rewound without
//!   copying;
//! - when growth is needed and at most half of the filled bytes are parsed,
//!   the allocation grows in place and keeps every byte;
//! - otherwise the unconsumed tail is moved to the front as part of the
//!   growth, so dead bytes are not carried into the new allocation.

use core::fmt;

use crate::UnpackerOptions;

pub(crate) struct GrowableBuffer {
    storage: Vec<u8>,
    size: usize,
    free: usize,
    consumed: usize,
    initial_capacity: usize,
}

impl fmt::Debug for GrowableBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrowableBuffer")
            .field("consumed", &self.consumed)
            .field("size", &self.size)
            .field("free", &self.free)
            .field("capacity", &self.storage.len())
            .finish()
    }
}

/// Doubles `capacity` until it covers `needed`, stopping at `needed` itself
/// when doubling would overflow.
fn doubled_until(mut capacity: usize, needed: usize) -> usize {
    while capacity < needed {
        capacity = capacity.checked_mul(2).unwrap_or(needed);
    }
    capacity
}

impl GrowableBuffer {
    pub(crate) fn new(initial_capacity: usize) -> Self {
        Self {
            storage: Vec::new(),
            size: 0,
            free: 0,
            consumed: 0,
            initial_capacity: initial_capacity.clamp(1, UnpackerOptions::MAX_BUFFER_REQUEST),
        }
    }

    /// Ensures at least `require` free bytes after the filled region and
    /// returns the whole free region.
    pub(crate) fn reserve(&mut self, require: usize) -> &mut [u8] {
        if self.storage.is_empty() {
            let capacity = doubled_until(self.initial_capacity, require);
            tracing::debug!(capacity, "allocated unpack buffer");
            self.storage = vec![0; capacity];
            self.free = capacity;
            self.size = 0;
            self.consumed = 0;
            return self.spare_mut();
        }

        if self.consumed >= self.size {
            self.free += self.size;
            self.size = 0;
            self.consumed = 0;
        }

        if require <= self.free {
            return self.spare_mut();
        }

        let doubled = self.storage.len().saturating_mul(2);
        if self.consumed <= self.size / 2 {
            let capacity = doubled_until(doubled, self.size.saturating_add(require));
            self.storage.resize(capacity, 0);
            self.free = capacity - self.size;
            tracing::debug!(capacity, size = self.size, "grew unpack buffer in place");
        } else {
            let unconsumed = self.size - self.consumed;
            let capacity = doubled_until(doubled, unconsumed.saturating_add(require));
            self.storage.copy_within(self.consumed..self.size, 0);
            self.storage.resize(capacity, 0);
            self.size = unconsumed;
            self.free = capacity - unconsumed;
            tracing::debug!(
                capacity,
                moved = unconsumed,
                dropped = self.consumed,
                "grew unpack buffer and compacted"
            );
            self.consumed = 0;
        }
        self.spare_mut()
    }

    /// Copies `bytes` after the filled region.
    pub(crate) fn append(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        if self.free < bytes.len() {
            self.reserve(bytes.len());
        }
        self.storage[self.size..self.size + bytes.len()].copy_from_slice(bytes);
        self.size += bytes.len();
        self.free -= bytes.len();
    }

    /// Marks `n` bytes written into the free region as filled.
    pub(crate) fn commit(&mut self, n: usize) {
        debug_assert!(n <= self.free);
        self.size += n;
        self.free -= n;
    }

    /// Marks `n` unconsumed bytes as parsed.
    pub(crate) fn consume(&mut self, n: usize) {
        debug_assert!(self.consumed + n <= self.size);
        self.consumed += n;
    }

    pub(crate) fn unconsumed(&self) -> &[u8] {
        &self.storage[self.consumed..self.size]
    }

    pub(crate) fn has_unconsumed(&self) -> bool {
        self.size > self.consumed
    }

    fn spare_mut(&mut self) -> &mut [u8] {
        &mut self.storage[self.size..]
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.storage.len()
    }

    #[cfg(test)]
    pub(crate) fn regions(&self) -> (usize, usize, usize) {
        (self.consumed, self.size, self.free)
    }
}
