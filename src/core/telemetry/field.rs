use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HostsnapError;

/// Stable identifier of one snapshot field.
///
/// The snake_case names are part of the output contract: consumers key
/// lookups by them, so variants are never renamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    OsName,
    OsVersion,
    Architecture,
    HostName,
    KernelName,
    KernelVersion,
    UptimeSeconds,
    Displays,
    Cpu,
    Gpus,
    Memory,
    Storage,
    Power,
}

impl FieldKey {
    /// Every key, in declaration order.
    pub const ALL: [FieldKey; 13] = [
        FieldKey::OsName,
        FieldKey::OsVersion,
        FieldKey::Architecture,
        FieldKey::HostName,
        FieldKey::KernelName,
        FieldKey::KernelVersion,
        FieldKey::UptimeSeconds,
        FieldKey::Displays,
        FieldKey::Cpu,
        FieldKey::Gpus,
        FieldKey::Memory,
        FieldKey::Storage,
        FieldKey::Power,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::OsName => "os_name",
            FieldKey::OsVersion => "os_version",
            FieldKey::Architecture => "architecture",
            FieldKey::HostName => "host_name",
            FieldKey::KernelName => "kernel_name",
            FieldKey::KernelVersion => "kernel_version",
            FieldKey::UptimeSeconds => "uptime_seconds",
            FieldKey::Displays => "displays",
            FieldKey::Cpu => "cpu",
            FieldKey::Gpus => "gpus",
            FieldKey::Memory => "memory",
            FieldKey::Storage => "storage",
            FieldKey::Power => "power",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = HostsnapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        FieldKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| HostsnapError::unknown_field(s))
    }
}
