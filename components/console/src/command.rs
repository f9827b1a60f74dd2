//! Command table and dispatch
//!
//! Commands are matched by exact, whole-line equality. There is no
//! tokenizing and no argument handling.

use core::fmt::{self, Write};

use crate::FW_VERSION;

/// Reply for a line that matches no command
pub const UNRECOGNIZED: &str = "Unrecognized command. Type 'help' for the list.\r\n";

/// Hardware the console drives
///
/// Console replies go through [`fmt::Write`]; on target this is the UART
/// transmit path.
pub trait Board: Write {
    /// Drive the user LED (LD2)
    fn set_user_led(&mut self, on: bool);
}

/// Action bound to a command name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    LedOn,
    LedOff,
    Version,
    Help,
}

/// Command table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub name: &'static str,
    pub action: Action,
    pub help: &'static str,
}

/// Every command the console understands
pub const COMMANDS: [Command; 4] = [
    Command {
        name: "led on",
        action: Action::LedOn,
        help: "Turn the user LED (LD2) on.",
    },
    Command {
        name: "led off",
        action: Action::LedOff,
        help: "Turn the user LED (LD2) off.",
    },
    Command {
        name: "version",
        action: Action::Version,
        help: "Show the firmware version.",
    },
    Command {
        name: "help",
        action: Action::Help,
        help: "Show this help.",
    },
];

/// Length of the longest command name
pub const fn longest_name(commands: &[Command]) -> usize {
    let mut longest = 0;
    let mut i = 0;
    while i < commands.len() {
        if commands[i].name.len() > longest {
            longest = commands[i].name.len();
        }
        i += 1;
    }
    longest
}

/// Result of dispatching one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A command matched and ran
    Executed(Action),
    /// Empty line, nothing to do
    Ignored,
    /// No command matched; the fallback message was printed
    Unrecognized,
}

impl Action {
    /// Run the action against the board
    pub fn execute<B: Board>(self, board: &mut B) -> fmt::Result {
        match self {
            Action::LedOn => {
                board.set_user_led(true);
                board.write_str("LED ON\r\n")
            }
            Action::LedOff => {
                board.set_user_led(false);
                board.write_str("LED OFF\r\n")
            }
            Action::Version => write!(board, "Firmware v{}\r\n", FW_VERSION),
            Action::Help => {
                board.write_str("--- Available Commands ---\r\n")?;
                for command in COMMANDS.iter() {
                    write!(board, "{:<10}: {}\r\n", command.name, command.help)?;
                }
                board.write_str("--------------------------\r\n")
            }
        }
    }
}

/// Find the command whose name equals `line` exactly
pub fn lookup(line: &[u8]) -> Option<Command> {
    COMMANDS
        .iter()
        .find(|command| command.name.as_bytes() == line)
        .copied()
}

/// Execute the command named by `line`
///
/// Empty lines are ignored silently. Unknown lines print [`UNRECOGNIZED`].
pub fn dispatch<B: Board>(line: &[u8], board: &mut B) -> Result<Outcome, fmt::Error> {
    if line.is_empty() {
        return Ok(Outcome::Ignored);
    }

    match lookup(line) {
        Some(command) => {
            log::debug!("console: running '{}'", command.name);
            command.action.execute(board)?;
            Ok(Outcome::Executed(command.action))
        }
        None => {
            board.write_str(UNRECOGNIZED)?;
            Ok(Outcome::Unrecognized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::String;

    #[derive(Default)]
    struct TestBoard {
        out: String,
        led: Option<bool>,
    }

    impl Write for TestBoard {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            self.out.push_str(s);
            Ok(())
        }
    }

    impl Board for TestBoard {
        fn set_user_led(&mut self, on: bool) {
            self.led = Some(on);
        }
    }

    #[test]
    fn test_led_commands() {
        let mut board = TestBoard::default();

        assert_eq!(
            dispatch(b"led on", &mut board),
            Ok(Outcome::Executed(Action::LedOn))
        );
        assert_eq!(board.led, Some(true));
        assert_eq!(board.out, "LED ON\r\n");

        board.out.clear();
        assert_eq!(
            dispatch(b"led off", &mut board),
            Ok(Outcome::Executed(Action::LedOff))
        );
        assert_eq!(board.led, Some(false));
        assert_eq!(board.out, "LED OFF\r\n");
    }

    #[test]
    fn test_version_reply() {
        let mut board = TestBoard::default();
        dispatch(b"version", &mut board).unwrap();
        assert_eq!(board.out, format!("Firmware v{}\r\n", FW_VERSION));
    }

    #[test]
    fn test_help_lists_every_command() {
        let mut board = TestBoard::default();
        dispatch(b"help", &mut board).unwrap();

        assert!(board.out.starts_with("--- Available Commands ---\r\n"));
        assert!(board.out.contains("led on    : Turn the user LED (LD2) on.\r\n"));
        assert!(board.out.contains("help      : Show this help.\r\n"));
        assert_eq!(board.out.lines().count(), COMMANDS.len() + 2);
        assert_eq!(board.led, None);
    }

    #[test]
    fn test_match_is_exact() {
        let mut board = TestBoard::default();
        let lines: [&[u8]; 5] = [b"led  on", b"LED ON", b"led on ", b"versions", b"hel"];
        for line in lines {
            board.out.clear();
            assert_eq!(dispatch(line, &mut board), Ok(Outcome::Unrecognized));
            assert_eq!(board.out, UNRECOGNIZED);
        }
        assert_eq!(board.led, None);
    }

    #[test]
    fn test_empty_line_is_ignored() {
        let mut board = TestBoard::default();
        assert_eq!(dispatch(b"", &mut board), Ok(Outcome::Ignored));
        assert!(board.out.is_empty());
    }

    #[test]
    fn test_longest_name() {
        assert_eq!(longest_name(&COMMANDS), 7);
        assert_eq!(longest_name(&[]), 0);
    }
}
