//! Bring-up Console - Line-oriented command interpreter
//!
//! # Purpose
//! Gives a freshly assembled board a minimal serial console: toggle the user
//! LED, report the firmware version and list the available commands.
//!
//! # Integration Points
//! - Depends on: `bringup-ringbuf` (receive ring, consumer side)
//! - Provides to: the firmware main loop
//! - Hardware: UART transmit and the user LED, both behind [`Board`]
//!
//! # Architecture
//! The receive interrupt pushes raw bytes into the RX ring. The main loop
//! calls [`Console::service`], which drains what is buffered, assembles
//! lines and dispatches each one against a static command table.

#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

use core::fmt;

use bringup_ringbuf::{Consumer, RingBuffer};
use static_assertions::const_assert;

mod command;
mod line;

pub use command::{
    dispatch, longest_name, lookup, Action, Board, Command, Outcome, COMMANDS, UNRECOGNIZED,
};
pub use line::{Feed, LineAssembler};

/// Firmware version reported by the `version` command
pub const FW_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Banner printed once the console comes up
pub const BANNER: &str = concat!("BRING-UP-FW V", env!("CARGO_PKG_VERSION"), "\r\n");

/// Reply when a line was longer than the assembler holds
pub const LINE_TOO_LONG: &str = "Line too long, discarded.\r\n";

/// RX ring size (usable capacity is one less)
pub const RX_BUFFER_SIZE: usize = 64;

/// Longest line the console accepts
pub const LINE_CAPACITY: usize = 32;

/// Bytes copied out of the RX ring per read
const SERVICE_CHUNK: usize = 16;

const_assert!(RX_BUFFER_SIZE >= 2);
const_assert!(LINE_CAPACITY >= longest_name(&COMMANDS));
const_assert!(SERVICE_CHUNK > 0);

/// Receive ring sized for the console
pub type RxBuffer = RingBuffer<RX_BUFFER_SIZE>;

/// Console counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleStats {
    /// Lines that matched a command
    pub executed: u32,
    /// Non-empty lines that matched nothing
    pub unrecognized: u32,
    /// Lines discarded for length
    pub overflows: u32,
}

/// Console state owned by the main loop
pub struct Console<const L: usize = LINE_CAPACITY> {
    line: LineAssembler<L>,
    stats: ConsoleStats,
}

impl<const L: usize> Console<L> {
    pub const fn new() -> Self {
        Self {
            line: LineAssembler::new(),
            stats: ConsoleStats {
                executed: 0,
                unrecognized: 0,
                overflows: 0,
            },
        }
    }

    /// Print the banner
    pub fn start<B: Board>(&mut self, board: &mut B) -> fmt::Result {
        board.write_str(BANNER)
    }

    /// Process the bytes buffered in the RX ring
    ///
    /// Only the bytes present on entry are handled, so a producer that keeps
    /// pushing cannot hold the main loop here.
    pub fn service<const N: usize, B: Board>(
        &mut self,
        rx: &mut Consumer<'_, N>,
        board: &mut B,
    ) -> fmt::Result {
        if rx.is_empty() {
            return Ok(());
        }

        let mut budget = rx.used_slots();
        let mut chunk = [0u8; SERVICE_CHUNK];
        while budget > 0 {
            let want = budget.min(SERVICE_CHUNK);
            let n = rx.read_available(&mut chunk[..want]);
            if n == 0 {
                break;
            }
            budget -= n;
            for &byte in &chunk[..n] {
                self.handle_byte(byte, board)?;
            }
        }

        Ok(())
    }

    /// Feed one byte to the line assembler, dispatching complete lines
    pub fn handle_byte<B: Board>(&mut self, byte: u8, board: &mut B) -> fmt::Result {
        match self.line.feed(byte) {
            Feed::Pending => {}
            Feed::Line(line) => match dispatch(line, board)? {
                Outcome::Executed(_) => self.stats.executed += 1,
                Outcome::Unrecognized => self.stats.unrecognized += 1,
                Outcome::Ignored => {}
            },
            Feed::Overflow => {
                self.stats.overflows += 1;
                board.write_str(LINE_TOO_LONG)?;
            }
        }
        Ok(())
    }

    /// Counters since startup
    pub fn stats(&self) -> ConsoleStats {
        self.stats
    }
}

impl<const L: usize> Default for Console<L> {
    fn default() -> Self {
        Self::new()
    }
}
