use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::telemetry::{AggregatorConfig, ExecutionMode, FieldKey, DEFAULT_PROBE_TIMEOUT};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Upper bound for one probe, in milliseconds
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
    #[serde(default)]
    pub execution: ExecutionMode,
    /// Fields left out of the standard registry
    #[serde(default)]
    pub disabled_fields: Vec<FieldKey>,
    /// Volume reported by the storage probe; the system volume when unset
    #[serde(default)]
    pub storage_mount_point: Option<String>,
}

fn default_probe_timeout_ms() -> u64 {
    DEFAULT_PROBE_TIMEOUT.as_millis() as u64
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_timeout_ms: default_probe_timeout_ms(),
            execution: ExecutionMode::default(),
            disabled_fields: Vec::new(),
            storage_mount_point: None,
        }
    }
}

impl Config {
    /// Load from the user config directory, falling back to defaults.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Missing, empty or unreadable-as-JSON files yield the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if data.trim().is_empty() {
            return Ok(Config::default());
        }

        Ok(serde_json::from_str(&data).unwrap_or_else(|e| {
            warn!("Ignoring corrupted config file {:?}: {}", path, e);
            Config::default()
        }))
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data = serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(path, data).with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("hostsnap").join("config.json"))
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn is_disabled(&self, key: FieldKey) -> bool {
        self.disabled_fields.contains(&key)
    }

    /// The volume the storage probe reports on.
    pub fn storage_mount_point(&self) -> String {
        self.storage_mount_point
            .clone()
            .unwrap_or_else(default_mount_point)
    }

    pub fn aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig {
            probe_timeout: self.probe_timeout(),
            execution: self.execution,
        }
    }
}

#[cfg(windows)]
fn default_mount_point() -> String {
    let drive = std::env::var("SystemDrive").unwrap_or_else(|_| "C:".to_string());
    format!("{}\\", drive.trim_end_matches('\\'))
}

#[cfg(not(windows))]
fn default_mount_point() -> String {
    "/".to_string()
}
