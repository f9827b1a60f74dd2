//! Producer and consumer handles
//!
//! Obtained from [`RingBuffer::split`]. The producer is typically owned by a
//! receive interrupt handler and the consumer by the polling task. Each
//! handle is `Send` so the two roles can live in different execution
//! contexts; neither is `Clone`, which keeps the queue single-producer and
//! single-consumer.

use crate::error::Result;
use crate::ring::RingBuffer;

/// Producer handle for the ring buffer
///
/// Only allows push operations and capacity queries.
#[derive(Debug)]
pub struct Producer<'a, const N: usize> {
    ring: &'a RingBuffer<N>,
}

impl<'a, const N: usize> Producer<'a, N> {
    pub(crate) fn new(ring: &'a RingBuffer<N>) -> Self {
        Self { ring }
    }

    /// Push a byte into the ring buffer
    pub fn push(&mut self, byte: u8) -> Result<()> {
        self.ring.produce(byte)
    }

    /// Push a batch of bytes, all or nothing
    ///
    /// See [`RingBuffer::stream_push`].
    pub fn stream_push(&mut self, bytes: &[u8]) -> Result<()> {
        self.ring.produce_stream(bytes)
    }

    /// Check if buffer is full
    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    /// Check if adding `n` bytes would exceed the usable capacity
    pub fn would_fill(&self, n: usize) -> bool {
        self.ring.would_fill(n)
    }

    /// Number of bytes that can still be pushed
    pub fn free_slots(&self) -> usize {
        self.ring.free_slots()
    }

    /// Number of bytes waiting for the consumer
    pub fn used_slots(&self) -> usize {
        self.ring.used_slots()
    }
}

/// Consumer handle for the ring buffer
///
/// Only allows pop operations and capacity queries.
#[derive(Debug)]
pub struct Consumer<'a, const N: usize> {
    ring: &'a RingBuffer<N>,
}

impl<'a, const N: usize> Consumer<'a, N> {
    pub(crate) fn new(ring: &'a RingBuffer<N>) -> Self {
        Self { ring }
    }

    /// Pop the oldest byte
    pub fn pop(&mut self) -> Result<u8> {
        self.ring.consume()
    }

    /// Pop exactly `out.len()` bytes
    ///
    /// See [`RingBuffer::stream_pop`].
    pub fn stream_pop(&mut self, out: &mut [u8]) -> Result<()> {
        self.ring.consume_stream(out)
    }

    /// Pop whatever is available, up to `out.len()` bytes
    ///
    /// Returns the number of bytes copied into `out`.
    pub fn read_available(&mut self, out: &mut [u8]) -> usize {
        self.ring.consume_available(out)
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Check if buffer is full
    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    /// Number of bytes that can still be pushed
    pub fn free_slots(&self) -> usize {
        self.ring.free_slots()
    }

    /// Number of bytes ready to be popped
    pub fn used_slots(&self) -> usize {
        self.ring.used_slots()
    }
}
