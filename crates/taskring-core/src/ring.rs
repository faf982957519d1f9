//! Fixed-capacity circular buffer
//!
//! `BoundedQueue` is a plain data structure with no internal
//! synchronization. The dispatcher wraps it in its single state mutex so
//! that a fullness check and the following push (or an emptiness check and
//! the following pop) happen in one critical section.
//!
//! # Layout
//!
//! ```text
//!   read ──┐            ┌── write
//!          ▼            ▼
//!   [ _ ][ A ][ B ][ C ][ _ ][ _ ][ _ ][ _ ]     len = 3, capacity = 8
//! ```
//!
//! Both cursors advance modulo `capacity`. `len == 0` is empty,
//! `len == capacity` is full.

/// Fixed-capacity FIFO ring buffer.
///
/// `push` on a full queue and `pop` on an empty queue are caller bugs and
/// panic. Callers must check `is_full()` / `is_empty()` first.
pub struct BoundedQueue<T> {
    slots: Box<[Option<T>]>,
    read: usize,
    write: usize,
    len: usize,
}

impl<T> BoundedQueue<T> {
    /// Create an empty queue holding at most `capacity` items.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "BoundedQueue capacity must be at least 1");
        let slots = (0..capacity).map(|_| None).collect::<Vec<_>>().into_boxed_slice();
        Self {
            slots,
            read: 0,
            write: 0,
            len: 0,
        }
    }

    /// Insert at the write cursor.
    ///
    /// # Panics
    ///
    /// Panics if the queue is full.
    pub fn push(&mut self, item: T) {
        assert!(!self.is_full(), "push on full BoundedQueue");
        debug_assert!(self.slots[self.write].is_none());

        self.slots[self.write] = Some(item);
        self.write = (self.write + 1) % self.slots.len();
        self.len += 1;
    }

    /// Remove and return the item at the read cursor.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    pub fn pop(&mut self) -> T {
        assert!(!self.is_empty(), "pop on empty BoundedQueue");

        let item = match self.slots[self.read].take() {
            Some(item) => item,
            None => unreachable!("occupied slot {} is vacant", self.read),
        };
        self.read = (self.read + 1) % self.slots.len();
        self.len -= 1;
        item
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Number of queued items.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl<T> std::fmt::Debug for BoundedQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedQueue")
            .field("len", &self.len)
            .field("capacity", &self.slots.len())
            .field("read", &self.read)
            .field("write", &self.write)
            .finish()
    }
}
