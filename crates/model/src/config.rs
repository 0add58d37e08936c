//! Configuration system for the UART model.
//!
//! This module defines the configuration structures and enums used to
//! parameterize the model. It provides:
//! 1. **Defaults:** Baseline constants (MMIO base, heartbeat interval).
//! 2. **Seed scripts:** Selectable console-input scripts injected at init.
//! 3. **Ingestion:** JSON deserialization from a string or a file path.
//!
//! Configuration is supplied via JSON from an enclosing harness, or use
//! `UartConfig::default()` for a standalone model.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default configuration constants for the model.
///
/// These values define the baseline behavior when not explicitly overridden
/// in a JSON configuration.
mod defaults {
    /// Base address of the UART 16550-compatible MMIO region.
    pub const UART_BASE: u64 = 0x1000_0000;

    /// Minimum wall-clock gap between heartbeat lines (one minute).
    ///
    /// The heartbeat is a liveness marker for operators watching long
    /// simulations; it carries no functional meaning.
    pub const HEARTBEAT_INTERVAL_MS: u32 = 60_000;
}

/// Console input seeded into the RX FIFO at initialization.
const LOGIN_SEED: &str = "root\n";

/// Longer scripted session for shell-driven boots.
///
/// Bytes beyond the RX FIFO capacity are dropped at enqueue time; the loss is
/// intentional and matches the modeled hardware's overflow behavior.
const SHELL_SEED: &str = "ls\n\
    echo 123\n\
    cd /root/benchmark\n\
    ls\n\
    ./stream\n\
    ls\n\
    cd /root/redis\n\
    ls\n\
    ifconfig -a\n\
    ./redis-server\n";

/// Errors produced while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration JSON did not parse or did not match the schema.
    #[error("malformed config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Boot-time console input injected into the RX FIFO.
///
/// The seed makes simulated software see input as if a human had typed at
/// console start. Scripts longer than the FIFO capacity are truncated
/// silently at enqueue time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedScript {
    /// No bytes are injected.
    Disabled,
    /// The five-byte login line `"root\n"`.
    #[default]
    Login,
    /// A compiled-in multi-command shell session.
    Shell,
    /// Caller-supplied script bytes.
    Custom(String),
}

impl SeedScript {
    /// Returns the script bytes to enqueue at initialization.
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Disabled => &[],
            Self::Login => LOGIN_SEED.as_bytes(),
            Self::Shell => SHELL_SEED.as_bytes(),
            Self::Custom(script) => script.as_bytes(),
        }
    }
}

/// UART model configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UartConfig {
    /// Base physical address of the UART MMIO window.
    pub base_addr: u64,
    /// Route character egress to stderr instead of stdout (useful when an
    /// embedding harness owns stdout).
    pub to_stderr: bool,
    /// Console input injected into the RX FIFO at init.
    pub seed: SeedScript,
    /// Minimum wall-clock gap between heartbeat diagnostic lines.
    pub heartbeat_interval_ms: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            base_addr: defaults::UART_BASE,
            to_stderr: false,
            seed: SeedScript::default(),
            heartbeat_interval_ms: defaults::HEARTBEAT_INTERVAL_MS,
        }
    }
}

impl UartConfig {
    /// Parses a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the JSON is malformed or does not
    /// match the schema.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, or
    /// [`ConfigError::Parse`] when its contents are not valid config JSON.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
