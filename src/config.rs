//! Runtime configuration, loaded from TOML.
//!
//! ```toml
//! [checkout]
//! poll_interval_ms = 100
//! max_ticks = 60000
//!
//! [manual]
//! payment_instructions = "Send a check to ..."
//! ```

use crate::error::Result;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_max_ticks() -> u64 {
    60_000
}

fn default_true() -> bool {
    true
}

fn default_order_view_base() -> String {
    "/dashboard/orders".to_string()
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub checkout: CheckoutConfig,
    pub manual: ManualGatewayConfig,
}

/// Timing of a submission attempt.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,
    /// Shown to the user when validation times out. Unset keeps timeouts silent.
    #[serde(default)]
    pub timeout_message: Option<String>,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            max_ticks: default_max_ticks(),
            timeout_message: None,
        }
    }
}

impl CheckoutConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    /// Total time an attempt may stay running.
    pub fn deadline(&self) -> Duration {
        self.poll_interval()
            .saturating_mul(u32::try_from(self.max_ticks).unwrap_or(u32::MAX))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManualGatewayConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub payment_instructions: Option<String>,
    #[serde(default = "default_order_view_base")]
    pub order_view_base: String,
}

impl Default for ManualGatewayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            payment_instructions: None,
            order_view_base: default_order_view_base(),
        }
    }
}

impl Config {
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml(&source)
    }
}
