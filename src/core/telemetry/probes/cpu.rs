use std::thread;
use std::time::Duration;
use sysinfo::{CpuRefreshKind, RefreshKind, System, MINIMUM_CPU_UPDATE_INTERVAL};

use crate::core::telemetry::probe::Probe;
use crate::core::telemetry::types::{CpuInfo, FieldValue, ProbeOutcome, Reading};
use crate::core::telemetry::units;
use crate::error::ProbeError;

/// Raw CPU facts as read from the platform.
#[derive(Debug, Clone, Default)]
pub struct RawCpu {
    pub brand: String,
    pub logical_cores: usize,
    /// Clock in Hz: the CPUID base frequency when the CPU reports one,
    /// otherwise a sampled current clock. Zero when neither is known.
    pub frequency_hz: u64,
}

pub struct CpuProbe;

impl Probe for CpuProbe {
    fn run(&self) -> ProbeOutcome {
        let refresh = RefreshKind::nothing().with_cpu(CpuRefreshKind::everything());
        let mut sys = System::new_with_specifics(refresh);

        let base_hz = base_frequency_hz();
        if base_hz.is_none() {
            // sysinfo only knows the current clock; the first refresh is
            // often stale, so sample it a second time
            thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL.max(Duration::from_millis(100)));
            sys.refresh_cpu_frequency();
        }

        let cpus = sys.cpus();
        let raw = cpus.first().map(|first| RawCpu {
            brand: first.brand().trim().to_string(),
            logical_cores: cpus.len(),
            frequency_hz: base_hz.unwrap_or_else(|| units::mhz_to_hz(first.frequency())),
        });

        interpret_cpu(raw)
    }

    fn describe(&self) -> &'static str {
        "cpu"
    }
}

/// Processor base frequency from CPUID leaf 0x16, when the CPU reports it.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn base_frequency_hz() -> Option<u64> {
    use raw_cpuid::CpuId;

    let cpuid = CpuId::new();
    let info = cpuid.get_processor_frequency_info()?;
    match info.processor_base_frequency() {
        0 => None,
        mhz => Some(units::mhz_to_hz(mhz as u64)),
    }
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
fn base_frequency_hz() -> Option<u64> {
    None
}

/// Build the CPU outcome from raw facts.
///
/// A zero frequency means the platform exposes no clock at all
/// (dynamic-frequency designs); it becomes an unavailable reading rather
/// than `0 GHz`, while name and core count are still reported.
pub fn interpret_cpu(raw: Option<RawCpu>) -> ProbeOutcome {
    let Some(raw) = raw else {
        return ProbeOutcome::failed(ProbeError::malformed("platform reported no CPUs"));
    };

    if raw.brand.is_empty() {
        return ProbeOutcome::failed(ProbeError::malformed("CPU brand string is empty"));
    }

    let frequency_ghz = match raw.frequency_hz {
        0 => Reading::unavailable("platform does not expose a clock frequency"),
        hz => Reading::value(units::hz_to_ghz(hz)),
    };

    ProbeOutcome::ok(FieldValue::Cpu(CpuInfo {
        name: raw.brand,
        logical_cores: raw.logical_cores as u32,
        frequency_ghz,
    }))
}
