use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ProbeError;

/// Result of running one probe.
///
/// `Unavailable` is an expected absence (no battery, headless host);
/// `Failed` means the query was attempted and broke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbeOutcome {
    Ok { value: FieldValue },
    Unavailable { reason: String },
    Failed { error: ProbeError },
}

impl ProbeOutcome {
    pub fn ok(value: FieldValue) -> Self {
        ProbeOutcome::Ok { value }
    }

    pub fn unavailable<S: Into<String>>(reason: S) -> Self {
        ProbeOutcome::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn failed(error: ProbeError) -> Self {
        ProbeOutcome::Failed { error }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ProbeOutcome::Ok { .. })
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, ProbeOutcome::Unavailable { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ProbeOutcome::Failed { .. })
    }

    pub fn value(&self) -> Option<&FieldValue> {
        match self {
            ProbeOutcome::Ok { value } => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ProbeError> {
        match self {
            ProbeOutcome::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// Short status label used in logs and summaries.
    pub fn status(&self) -> &'static str {
        match self {
            ProbeOutcome::Ok { .. } => "ok",
            ProbeOutcome::Unavailable { .. } => "unavailable",
            ProbeOutcome::Failed { .. } => "failed",
        }
    }
}

impl From<Result<FieldValue, ProbeError>> for ProbeOutcome {
    fn from(result: Result<FieldValue, ProbeError>) -> Self {
        match result {
            Ok(value) => ProbeOutcome::ok(value),
            Err(error) => ProbeOutcome::failed(error),
        }
    }
}

/// A sub-field of a composite record that may be missing on its own
/// while the rest of the record is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Reading<T> {
    Value { value: T },
    Unavailable { reason: String },
}

impl<T> Reading<T> {
    pub fn value(value: T) -> Self {
        Reading::Value { value }
    }

    pub fn unavailable<S: Into<String>>(reason: S) -> Self {
        Reading::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Reading::Value { value } => Some(value),
            Reading::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Reading::Value { .. })
    }
}

/// Unit tag carried by scalar quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Seconds,
    Gigahertz,
    Bytes,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Unit::Seconds => "s",
            Unit::Gigahertz => "GHz",
            Unit::Bytes => "B",
        };
        f.write_str(symbol)
    }
}

/// Value shapes a field can take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Version(OsVersion),
    Quantity { value: f64, unit: Unit },
    Cpu(CpuInfo),
    Memory(MemoryInfo),
    Storage(StorageInfo),
    Power(PowerInfo),
    Gpus(Vec<GpuInfo>),
    Displays(Vec<DisplayInfo>),
}

impl FieldValue {
    pub fn text<S: Into<String>>(text: S) -> Self {
        FieldValue::Text(text.into())
    }

    pub fn seconds(value: f64) -> Self {
        FieldValue::Quantity {
            value,
            unit: Unit::Seconds,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Operating system version, as text plus its numeric components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsVersion {
    pub text: String,
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuInfo {
    pub name: String,
    pub logical_cores: u32,
    pub frequency_ghz: Reading<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryInfo {
    pub total_bytes: u64,
    pub used_bytes: u64,
}

/// Capacity of the designated volume; `used + available == total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageInfo {
    pub mount_point: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub available_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerInfo {
    /// Charge level in `[0, 1]`.
    pub battery_fraction: Reading<f64>,
    pub is_charging: Reading<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuInfo {
    pub name: String,
    pub integrated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayInfo {
    pub width: f64,
    pub height: f64,
    pub refresh_hz: Reading<f64>,
}
