//! Line assembly from a raw byte stream

/// What a single fed byte produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed<'a> {
    /// Byte consumed, line not finished yet
    Pending,
    /// A terminator completed this line (may be empty)
    Line(&'a [u8]),
    /// A terminator ended a line that did not fit and was discarded
    Overflow,
}

/// Fixed-size line accumulator
///
/// `\r` and `\n` both terminate a line, so `\r\n` yields one line followed
/// by an empty one. Backspace and DEL erase the last pending byte.
pub struct LineAssembler<const L: usize> {
    data: [u8; L],
    len: usize,
    overflowed: bool,
}

impl<const L: usize> LineAssembler<L> {
    pub const fn new() -> Self {
        Self {
            data: [0; L],
            len: 0,
            overflowed: false,
        }
    }

    /// Feed one received byte
    pub fn feed(&mut self, byte: u8) -> Feed<'_> {
        match byte {
            b'\r' | b'\n' => {
                let len = core::mem::take(&mut self.len);
                if core::mem::take(&mut self.overflowed) {
                    return Feed::Overflow;
                }
                Feed::Line(&self.data[..len])
            }
            0x08 | 0x7F => {
                if !self.overflowed && self.len > 0 {
                    self.len -= 1;
                }
                Feed::Pending
            }
            _ => {
                if self.overflowed {
                    return Feed::Pending;
                }
                if self.len >= L {
                    log::warn!("console: line exceeds {} bytes, discarding", L);
                    self.overflowed = true;
                    return Feed::Pending;
                }
                self.data[self.len] = byte;
                self.len += 1;
                Feed::Pending
            }
        }
    }

    /// Bytes received since the last terminator
    pub fn pending(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Drop the partial line
    pub fn clear(&mut self) {
        self.len = 0;
        self.overflowed = false;
    }
}

impl<const L: usize> Default for LineAssembler<L> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    fn lines<const L: usize>(input: &[u8]) -> Vec<Result<Vec<u8>, ()>> {
        let mut asm: LineAssembler<L> = LineAssembler::new();
        let mut out = Vec::new();
        for &byte in input {
            match asm.feed(byte) {
                Feed::Pending => {}
                Feed::Line(line) => out.push(Ok(line.to_vec())),
                Feed::Overflow => out.push(Err(())),
            }
        }
        out
    }

    #[test]
    fn test_crlf_yields_line_then_empty() {
        assert_eq!(
            lines::<16>(b"help\r\n"),
            vec![Ok(b"help".to_vec()), Ok(Vec::new())]
        );
    }

    #[test]
    fn test_backspace_edits_pending_line() {
        assert_eq!(lines::<16>(b"vx\x08ersion\n"), vec![Ok(b"version".to_vec())]);
        assert_eq!(lines::<16>(b"\x7f\x7fhelp\n"), vec![Ok(b"help".to_vec())]);
    }

    #[test]
    fn test_overflow_discards_until_terminator() {
        assert_eq!(
            lines::<4>(b"toolong\nhelp\n"),
            vec![Err(()), Ok(b"help".to_vec())]
        );
    }

    #[test]
    fn test_exactly_full_line_fits() {
        assert_eq!(lines::<4>(b"help\n"), vec![Ok(b"help".to_vec())]);
    }

    #[test]
    fn test_pending_and_clear() {
        let mut asm: LineAssembler<8> = LineAssembler::new();
        asm.feed(b'l');
        asm.feed(b'e');
        assert_eq!(asm.pending(), b"le");
        asm.clear();
        assert!(asm.pending().is_empty());
        assert_eq!(asm.feed(b'\n'), Feed::Line(&[]));
    }
}
