//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument
//! 2. Default: config/parking.toml
//!
//! Every section is optional; missing values fall back to defaults.

use anyhow::{ensure, Context};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Lot name used when none is configured
pub const DEFAULT_LOT_NAME: &str = "Main Lot";

/// Default slot count for a new lot
pub const DEFAULT_TOTAL_SLOTS: usize = 10;

/// Default hourly rate in currency units
pub const DEFAULT_HOURLY_RATE: u64 = 5;

#[derive(Debug, Clone, Deserialize)]
pub struct LotConfig {
    #[serde(default = "default_lot_name")]
    pub name: String,
    #[serde(default = "default_total_slots")]
    pub total_slots: usize,
}

impl Default for LotConfig {
    fn default() -> Self {
        Self { name: default_lot_name(), total_slots: default_total_slots() }
    }
}

fn default_lot_name() -> String {
    DEFAULT_LOT_NAME.to_string()
}

fn default_total_slots() -> usize {
    DEFAULT_TOTAL_SLOTS
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeesConfig {
    #[serde(default = "default_hourly_rate")]
    pub hourly_rate: u64,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Lower bound on billed hours for any closed stay (0 keeps zero-minute stays free)
    #[serde(default)]
    pub min_billed_hours: u64,
}

impl Default for FeesConfig {
    fn default() -> Self {
        Self { hourly_rate: default_hourly_rate(), currency: default_currency(), min_billed_hours: 0 }
    }
}

fn default_hourly_rate() -> u64 {
    DEFAULT_HOURLY_RATE
}

fn default_currency() -> String {
    "NIS".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplicationConfig {
    /// Enable the JSONL occupancy replicator
    #[serde(default = "default_replication_enabled")]
    pub enabled: bool,
    /// File path for occupancy snapshots (JSONL format)
    #[serde(default = "default_replication_file")]
    pub file: String,
}

impl Default for ReplicationConfig {
    fn default() -> Self {
        Self { enabled: default_replication_enabled(), file: default_replication_file() }
    }
}

fn default_replication_enabled() -> bool {
    true
}

fn default_replication_file() -> String {
    "replication.jsonl".to_string()
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub lot: LotConfig,
    #[serde(default)]
    pub fees: FeesConfig,
    #[serde(default)]
    pub replication: ReplicationConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    lot_name: String,
    total_slots: usize,
    hourly_rate: u64,
    currency: String,
    min_billed_hours: u64,
    replication_enabled: bool,
    replication_file: String,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default(), "default".to_string())
    }
}

impl Config {
    fn from_toml(toml_config: TomlConfig, config_file: String) -> Self {
        Self {
            lot_name: toml_config.lot.name,
            total_slots: toml_config.lot.total_slots,
            hourly_rate: toml_config.fees.hourly_rate,
            currency: toml_config.fees.currency,
            min_billed_hours: toml_config.fees.min_billed_hours,
            replication_enabled: toml_config.replication.enabled,
            replication_file: toml_config.replication.file,
            config_file,
        }
    }

    /// Parse and validate TOML text; `source` names it in errors and `config_file()`
    fn parse(content: &str, source: &str) -> anyhow::Result<Self> {
        let toml_config: TomlConfig = toml::from_str(content)
            .with_context(|| format!("Failed to parse config file {source}"))?;
        ensure!(toml_config.lot.total_slots > 0, "lot.total_slots must be at least 1 in {source}");

        Ok(Self::from_toml(toml_config, source.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        Self::parse(&content, &path.display().to_string())
    }

    /// Load configuration - tries TOML file first, falls back to defaults
    pub fn load_from_path(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %format!("{e:#}"), "config_load_failed_using_defaults");
                Self::default()
            }
        }
    }

    /// Override the slot count (ignored when zero)
    pub fn with_total_slots(mut self, total_slots: usize) -> Self {
        if total_slots > 0 {
            self.total_slots = total_slots;
        }
        self
    }

    /// Override the replication file path
    pub fn with_replication_file(mut self, file: &str) -> Self {
        self.replication_file = file.to_string();
        self
    }

    pub fn lot_name(&self) -> &str {
        &self.lot_name
    }

    pub fn total_slots(&self) -> usize {
        self.total_slots
    }

    pub fn hourly_rate(&self) -> u64 {
        self.hourly_rate
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn min_billed_hours(&self) -> u64 {
        self.min_billed_hours
    }

    pub fn replication_enabled(&self) -> bool {
        self.replication_enabled
    }

    pub fn replication_file(&self) -> &str {
        &self.replication_file
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }
}
