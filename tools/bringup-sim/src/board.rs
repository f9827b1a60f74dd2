//! Host stand-in for the board: console on a writer, LED in a log line

use std::fmt;
use std::io;

use bringup_console::Board;

pub struct HostBoard<W: io::Write> {
    out: W,
    led: bool,
}

impl<W: io::Write> HostBoard<W> {
    pub fn new(out: W) -> Self {
        Self { out, led: false }
    }

    pub fn led(&self) -> bool {
        self.led
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: io::Write> fmt::Write for HostBoard<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.out.write_all(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

impl<W: io::Write> Board for HostBoard<W> {
    fn set_user_led(&mut self, on: bool) {
        if self.led != on {
            log::info!("LD2 -> {}", if on { "ON" } else { "OFF" });
        }
        self.led = on;
    }
}
