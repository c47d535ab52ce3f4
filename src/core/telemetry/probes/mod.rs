//! Concrete probes, one per field.
//!
//! Each probe reads its platform source and hands the raw values to a pure
//! `interpret`-style function, which is what the unit tests exercise.

mod arch;
mod cpu;
mod display;
mod gpu;
mod memory;
mod os;
mod power;
mod storage;
mod uptime;

pub use arch::{architecture_label, ArchitectureProbe};
pub use cpu::{interpret_cpu, CpuProbe, RawCpu};
pub use display::{interpret_displays, DisplayProbe};
pub use gpu::{classify_integrated, interpret_gpus, GpuProbe};
pub use memory::{interpret_memory, MemoryProbe};
pub use os::{
    interpret_os_version, parse_version, HostNameProbe, KernelNameProbe, KernelVersionProbe,
    OsNameProbe, OsVersionProbe,
};
pub use power::{interpret_power, PowerProbe};
pub use storage::{interpret_storage, StorageProbe};
pub use uptime::{interpret_uptime, UptimeProbe};

use std::sync::Arc;

use super::field::FieldKey;
use super::probe::Probe;
use super::types::{FieldValue, ProbeOutcome};
use crate::core::config::Config;

/// The probe that fills `key` on this host.
pub fn standard_probe(key: FieldKey, config: &Config) -> Arc<dyn Probe> {
    match key {
        FieldKey::OsName => Arc::new(OsNameProbe),
        FieldKey::OsVersion => Arc::new(OsVersionProbe),
        FieldKey::Architecture => Arc::new(ArchitectureProbe),
        FieldKey::HostName => Arc::new(HostNameProbe),
        FieldKey::KernelName => Arc::new(KernelNameProbe),
        FieldKey::KernelVersion => Arc::new(KernelVersionProbe),
        FieldKey::UptimeSeconds => Arc::new(UptimeProbe),
        FieldKey::Displays => Arc::new(DisplayProbe),
        FieldKey::Cpu => Arc::new(CpuProbe),
        FieldKey::Gpus => Arc::new(GpuProbe),
        FieldKey::Memory => Arc::new(MemoryProbe),
        FieldKey::Storage => Arc::new(StorageProbe::new(config.storage_mount_point())),
        FieldKey::Power => Arc::new(PowerProbe),
    }
}

/// `Ok(Text)` for a present, non-blank string, `Unavailable` otherwise.
fn text_or_unavailable(value: Option<String>, what: &str) -> ProbeOutcome {
    match value.map(|s| s.trim().to_string()) {
        Some(text) if !text.is_empty() => ProbeOutcome::ok(FieldValue::Text(text)),
        _ => ProbeOutcome::unavailable(format!("{} not reported by the platform", what)),
    }
}
