//! Ring buffer state, lifecycle and transfer primitives

use core::fmt;
use core::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use crate::error::{Result, RingError};
use crate::split::{Consumer, Producer};

/// Fixed-capacity byte FIFO
///
/// # Type Parameters
/// * `N` - Storage size in bytes (must be at least 2). One slot is always
///   kept free, so the usable capacity is `N - 1`.
///
/// # Occupancy
/// `count` is the authoritative number of valid bytes. `head` and `tail` are
/// storage cursors only and are never compared to decide full or empty.
///
/// # Memory Ordering
/// - Producer: writes the slot, then increments `count` with Release
/// - Consumer: loads `count` with Acquire before reading a slot, then
///   decrements `count` with Release once the slot has been read
/// - `head` is only written by the producer, `tail` only by the consumer
///
/// Targets need atomic read-modify-write on `usize` for the counter.
pub struct RingBuffer<const N: usize> {
    /// Backing storage
    storage: [AtomicU8; N],
    /// Next write position (producer side)
    head: AtomicUsize,
    /// Next read position (consumer side)
    tail: AtomicUsize,
    /// Number of valid bytes
    count: AtomicUsize,
}

impl<const N: usize> RingBuffer<N> {
    const VALID_SIZE: () = assert!(N >= 2, "Ring buffer size must be at least 2");

    /// Create a new empty ring buffer
    ///
    /// Usable in `static` initializers. Fails to compile if `N < 2`.
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID_SIZE;

        #[allow(clippy::declare_interior_mutable_const)]
        const ZERO: AtomicU8 = AtomicU8::new(0);

        Self {
            storage: [ZERO; N],
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            count: AtomicUsize::new(0),
        }
    }

    /// Usable capacity (`N - 1`)
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Reset cursors and occupancy to the empty state
    ///
    /// Storage contents are left as they are; use [`flush`](Self::flush)
    /// to scrub them.
    pub fn init(&mut self) {
        *self.head.get_mut() = 0;
        *self.tail.get_mut() = 0;
        *self.count.get_mut() = 0;
    }

    /// Empty the buffer and zero every storage byte
    ///
    /// Used to scrub residual data, e.g. between protocol sessions.
    pub fn flush(&mut self) {
        for byte in self.storage.iter_mut() {
            *byte.get_mut() = 0;
        }
        self.init();
        log::trace!("ring buffer flushed ({} bytes zeroed)", N);
    }

    /// Push a byte
    ///
    /// # Errors
    /// Returns `RingError::Full` if `N - 1` bytes are already stored. The
    /// buffer is left untouched in that case.
    pub fn push(&mut self, byte: u8) -> Result<()> {
        self.produce(byte)
    }

    /// Pop the oldest byte
    ///
    /// # Errors
    /// Returns `RingError::Empty` if no byte is stored
    pub fn pop(&mut self) -> Result<u8> {
        self.consume()
    }

    /// Push every byte of `bytes`, all or nothing
    ///
    /// Capacity is checked once before anything is written.
    ///
    /// # Errors
    /// - `RingError::InvalidArgument` if `bytes.len() >= N`
    /// - `RingError::Full` if the buffer is full or cannot take the batch
    pub fn stream_push(&mut self, bytes: &[u8]) -> Result<()> {
        self.produce_stream(bytes)
    }

    /// Pop `out.len()` bytes in FIFO order
    ///
    /// The batch size is not checked against [`used_slots`](Self::used_slots):
    /// if the data runs out mid-batch the popped prefix stays in `out` and
    /// `RingError::Empty` is returned.
    ///
    /// # Errors
    /// - `RingError::InvalidArgument` if `out` is empty
    /// - `RingError::Empty` if the buffer is (or becomes) empty
    pub fn stream_pop(&mut self, out: &mut [u8]) -> Result<()> {
        self.consume_stream(out)
    }

    /// Split into the producer and consumer roles
    ///
    /// The buffer stays mutably borrowed while either handle is alive, so
    /// lifecycle operations cannot race with a transfer.
    pub fn split(&mut self) -> (Producer<'_, N>, Consumer<'_, N>) {
        let ring: &Self = self;
        (Producer::new(ring), Consumer::new(ring))
    }

    /// Check if the buffer is full
    pub fn is_full(&self) -> bool {
        self.used_slots() >= N - 1
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.used_slots() == 0
    }

    /// Check if adding `n` bytes would exceed the usable capacity
    pub fn would_fill(&self, n: usize) -> bool {
        n > self.free_slots()
    }

    /// Number of bytes that can still be pushed
    pub fn free_slots(&self) -> usize {
        (N - 1) - self.used_slots()
    }

    /// Number of bytes currently stored
    pub fn used_slots(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    /// Forward distance from the read cursor to the write cursor
    ///
    /// Diagnostic view of occupancy. It always equals
    /// [`used_slots`](Self::used_slots); a mismatch means the cursors were
    /// corrupted and trips a debug assertion.
    pub fn cursor_span(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);

        let span = if head >= tail { head - tail } else { N + head - tail };

        debug_assert_eq!(
            span,
            self.used_slots(),
            "cursor span diverged from occupancy counter"
        );
        span
    }

    // Role primitives. Callers guarantee a single producer and a single
    // consumer, either through `&mut self` or through the split handles.

    pub(crate) fn produce(&self, byte: u8) -> Result<()> {
        if self.is_full() {
            return Err(RingError::Full);
        }

        let head = self.head.load(Ordering::Relaxed);
        self.storage[head].store(byte, Ordering::Relaxed);
        self.head.store(Self::advance(head), Ordering::Relaxed);

        // Publish the slot
        self.count.fetch_add(1, Ordering::Release);
        Ok(())
    }

    pub(crate) fn consume(&self) -> Result<u8> {
        if self.is_empty() {
            return Err(RingError::Empty);
        }

        let tail = self.tail.load(Ordering::Relaxed);
        let byte = self.storage[tail].load(Ordering::Relaxed);
        self.tail.store(Self::advance(tail), Ordering::Relaxed);

        // Hand the slot back to the producer
        self.count.fetch_sub(1, Ordering::Release);
        Ok(byte)
    }

    pub(crate) fn produce_stream(&self, bytes: &[u8]) -> Result<()> {
        if bytes.len() >= N {
            return Err(RingError::InvalidArgument { len: bytes.len() });
        }

        if self.is_full() || self.would_fill(bytes.len()) {
            return Err(RingError::Full);
        }

        for (pushed, &byte) in bytes.iter().enumerate() {
            let result = self.produce(byte);
            debug_assert!(
                result.is_ok(),
                "occupancy changed under a pre-checked stream push"
            );
            if let Err(err) = result {
                log::warn!(
                    "stream push aborted after {} of {} bytes: {}",
                    pushed,
                    bytes.len(),
                    err
                );
                return Err(err);
            }
        }

        Ok(())
    }

    pub(crate) fn consume_stream(&self, out: &mut [u8]) -> Result<()> {
        if out.is_empty() {
            return Err(RingError::InvalidArgument { len: 0 });
        }

        if self.is_empty() {
            return Err(RingError::Empty);
        }

        for slot in out.iter_mut() {
            *slot = self.consume()?;
        }

        Ok(())
    }

    pub(crate) fn consume_available(&self, out: &mut [u8]) -> usize {
        let mut copied = 0;
        for slot in out.iter_mut() {
            match self.consume() {
                Ok(byte) => {
                    *slot = byte;
                    copied += 1;
                }
                Err(_) => break,
            }
        }
        copied
    }

    /// Next cursor position, wrapping at `N` without a division
    #[inline]
    fn advance(index: usize) -> usize {
        let next = index + 1;
        if next >= N {
            0
        } else {
            next
        }
    }

    #[cfg(test)]
    fn storage_snapshot(&self) -> [u8; N] {
        let mut bytes = [0; N];
        for (dst, src) in bytes.iter_mut().zip(self.storage.iter()) {
            *dst = src.load(Ordering::Relaxed);
        }
        bytes
    }
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for RingBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &(N - 1))
            .field("head", &self.head.load(Ordering::Relaxed))
            .field("tail", &self.tail.load(Ordering::Relaxed))
            .field("count", &self.count.load(Ordering::Relaxed))
            .finish()
    }
}
