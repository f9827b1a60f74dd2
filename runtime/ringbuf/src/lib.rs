//! Ring Buffer - Fixed-capacity byte FIFO for interrupt-to-task buffering
//!
//! # Purpose
//! Buffers bytes crossing an asynchronous boundary on a microcontroller,
//! typically from a receive interrupt into a polling main loop (or the
//! reverse), without allocation, locking or blocking.
//!
//! # Integration Points
//! - Depends on: nothing beyond `core` atomics
//! - Provides to: UART receive paths, the bring-up console
//! - Capabilities required: none
//!
//! # Architecture
//! A single [`RingBuffer`] holds the storage, two cursors and an atomic
//! occupancy counter. The counter is the only source of truth for
//! full/empty decisions. [`RingBuffer::split`] hands out exactly one
//! [`Producer`] and one [`Consumer`] so the single-producer/single-consumer
//! discipline is enforced by the borrow checker rather than by convention.
//!
//! # Testing Strategy
//! - Unit tests: lifecycle, single-element and bulk transfer, capacity queries
//! - Integration tests: cross-thread SPSC streaming (`tests/spsc.rs`)
//! - Benchmarks: single vs bulk transfer (`benches/transfer.rs`)

#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

mod error;
mod ring;
mod split;

pub use error::{Result, RingError};
pub use ring::RingBuffer;
pub use split::{Consumer, Producer};
