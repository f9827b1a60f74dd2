//! Bring-up Simulator
//!
//! Runs the bring-up console on the host with two execution contexts: a
//! thread standing in for the UART receive interrupt (producer) and the main
//! thread standing in for the firmware main loop (consumer).
//!
//! Usage:
//!   bringup-sim [--config sim.toml] [--rx-burst N] [--no-banner] [script]
//!
//! The script (or stdin) is fed byte for byte; console replies go to stdout,
//! diagnostics to stderr via `RUST_LOG`.

mod board;
mod config;
mod feeder;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{anyhow, Context, Result};
use bringup_console::{Console, ConsoleStats, RxBuffer};
use clap::Parser;
use crossbeam::utils::Backoff;

use crate::board::HostBoard;
use crate::config::SimConfig;
use crate::feeder::FeedStats;

#[derive(Parser, Debug)]
#[command(name = "bringup-sim")]
#[command(version)]
#[command(about = "Run the bring-up console against a simulated UART receive interrupt")]
struct Args {
    /// Command script to feed through the RX ring (default: stdin)
    script: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bytes per simulated receive interrupt (overrides the config file)
    #[arg(long)]
    rx_burst: Option<usize>,

    /// Do not print the firmware banner
    #[arg(long)]
    no_banner: bool,
}

/// What one simulated session did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Summary {
    feed: FeedStats,
    console: ConsoleStats,
    led: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(rx_burst) = args.rx_burst {
        config.rx_burst = rx_burst;
    }
    if args.no_banner {
        config.banner = false;
    }
    config.validate()?;

    let input = read_input(args.script.as_ref())?;
    log::info!(
        "Feeding {} bytes in bursts of {} (RX ring: {} usable bytes)",
        input.len(),
        config.rx_burst,
        RxBuffer::new().capacity()
    );

    let stdout = io::stdout();
    let summary = run_session(&input, &config, HostBoard::new(stdout.lock()))?;

    log::info!(
        "RX: {} bursts, {} bytes, {} stalls",
        summary.feed.bursts,
        summary.feed.bytes,
        summary.feed.stalls
    );
    log::info!(
        "Console: {} executed, {} unrecognized, {} overflowed; LD2 {}",
        summary.console.executed,
        summary.console.unrecognized,
        summary.console.overflows,
        if summary.led { "ON" } else { "OFF" }
    );

    Ok(())
}

fn read_input(script: Option<&PathBuf>) -> Result<Vec<u8>> {
    match script {
        Some(path) => {
            fs::read(path).with_context(|| format!("Failed to read script {}", path.display()))
        }
        None => {
            let mut input = Vec::new();
            io::stdin()
                .read_to_end(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Run one console session over `input`
fn run_session<W: io::Write>(
    input: &[u8],
    config: &SimConfig,
    mut board: HostBoard<W>,
) -> Result<Summary> {
    let mut input = input.to_vec();
    if config.terminate_input && !matches!(input.last(), None | Some(b'\n' | b'\r')) {
        input.push(b'\n');
    }

    let mut console: Console = Console::new();
    let mut ring = RxBuffer::new();
    ring.flush();
    let (mut tx, mut rx) = ring.split();

    let done = AtomicBool::new(false);
    let stop = AtomicBool::new(false);

    let (fed, serviced) = crossbeam::scope(|s| {
        let rx_irq = s.spawn(|_| {
            let result = feeder::feed(&mut tx, &input, config.rx_burst, &stop);
            done.store(true, Ordering::Release);
            result
        });

        let serviced = (|| -> Result<()> {
            if config.banner {
                console.start(&mut board)?;
            }

            let backoff = Backoff::new();
            loop {
                // Read the flag first: once set, every byte is already in the ring
                let finished = done.load(Ordering::Acquire);
                if rx.is_empty() {
                    if finished {
                        return Ok(());
                    }
                    backoff.snooze();
                    continue;
                }
                console.service(&mut rx, &mut board)?;
                backoff.reset();
            }
        })();

        if serviced.is_err() {
            stop.store(true, Ordering::Release);
        }
        (rx_irq.join(), serviced)
    })
    .map_err(|_| anyhow!("Simulation thread panicked"))?;

    serviced.context("Console output failed")?;
    let feed = fed
        .map_err(|_| anyhow!("RX interrupt thread panicked"))?
        .context("RX interrupt rejected a burst")?;

    Ok(Summary {
        feed,
        console: console.stats(),
        led: board.led(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(script: &[u8], config: &SimConfig) -> (Summary, String) {
        let mut out = Vec::new();
        let summary = run_session(script, config, HostBoard::new(&mut out)).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_session_runs_script() {
        let config = SimConfig {
            banner: false,
            ..SimConfig::default()
        };
        let (summary, out) = session(b"led on\r\nversion\r\nled off\r\nnope", &config);

        assert!(out.starts_with("LED ON\r\nFirmware v"));
        assert!(out.contains("LED OFF\r\n"));
        assert!(out.ends_with(bringup_console::UNRECOGNIZED));
        assert_eq!(summary.console.executed, 3);
        assert_eq!(summary.console.unrecognized, 1);
        assert!(!summary.led);
    }

    #[test]
    fn test_tiny_bursts_still_deliver_everything() {
        let config = SimConfig {
            rx_burst: 1,
            banner: true,
            terminate_input: true,
        };
        let script = b"help\nled on\n".repeat(20);
        let (summary, out) = session(&script, &config);

        assert!(out.starts_with(bringup_console::BANNER));
        assert_eq!(summary.feed.bytes, script.len());
        assert_eq!(summary.feed.bursts, script.len());
        assert_eq!(summary.console.executed, 40);
        assert!(summary.led);
    }

    #[test]
    fn test_unterminated_script_left_pending() {
        let config = SimConfig {
            banner: false,
            terminate_input: false,
            ..SimConfig::default()
        };
        let (summary, out) = session(b"led on", &config);
        assert!(out.is_empty());
        assert_eq!(summary.console.executed, 0);
    }

    #[test]
    fn test_empty_script() {
        let (summary, out) = session(b"", &SimConfig::default());
        assert_eq!(out, bringup_console::BANNER);
        assert_eq!(summary.feed, FeedStats::default());
    }
}
