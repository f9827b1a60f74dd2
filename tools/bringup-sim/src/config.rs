//! Simulator configuration
//!
//! Read from an optional TOML file; command-line flags override it.
//!
//! ```toml
//! rx_burst = 8
//! banner = true
//! terminate_input = true
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use bringup_console::RX_BUFFER_SIZE;
use serde::Deserialize;
use static_assertions::const_assert;

/// Default bytes per simulated receive interrupt
pub const DEFAULT_RX_BURST: usize = 8;

// A burst must be accepted by stream_push on an empty ring
const_assert!(DEFAULT_RX_BURST > 0 && DEFAULT_RX_BURST < RX_BUFFER_SIZE);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Bytes delivered per simulated receive interrupt
    pub rx_burst: usize,
    /// Print the firmware banner before servicing input
    pub banner: bool,
    /// Append a newline when the script does not end with one
    pub terminate_input: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rx_burst: DEFAULT_RX_BURST,
            banner: true,
            terminate_input: true,
        }
    }
}

impl SimConfig {
    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rx_burst == 0 || self.rx_burst >= RX_BUFFER_SIZE {
            bail!(
                "rx_burst must be between 1 and {} (got {})",
                RX_BUFFER_SIZE - 1,
                self.rx_burst
            );
        }
        Ok(())
    }
}
