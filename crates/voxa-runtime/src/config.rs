//! Runtime configuration.
//!
//! Loaded from TOML at startup. Every field has a default, so a partial (or
//! absent) config file is fine.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use voxa_core::UsageRates;

const DEFAULT_TOOL_TIMEOUT_MS: u64 = 30_000;

/// Errors loading runtime configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed runtime config: {0}")]
    Malformed(#[from] toml::de::Error),
}

/// Tunable runtime settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Per-call deadline for tool implementations, in milliseconds.
    pub tool_timeout_ms: u64,
    /// Per-token rates for plain-turn charges.
    pub rates: UsageRates,
    /// Settings endpoint receiving `{"credits": amount}` debits. `None`
    /// disables ledger persistence.
    pub ledger_url: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tool_timeout_ms: DEFAULT_TOOL_TIMEOUT_MS,
            rates: UsageRates::default(),
            ledger_url: None,
        }
    }
}

impl RuntimeConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn tool_timeout(&self) -> Duration {
        Duration::from_millis(self.tool_timeout_ms)
    }
}
