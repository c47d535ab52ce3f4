use sysinfo::{MemoryRefreshKind, RefreshKind, System};

use crate::core::telemetry::probe::Probe;
use crate::core::telemetry::types::{FieldValue, MemoryInfo, ProbeOutcome};
use crate::error::ProbeError;
use crate::platform::memory::{read_page_counts, PageCounts};

/// Point sample of physical memory; consecutive calls may differ under
/// memory pressure.
pub struct MemoryProbe;

impl Probe for MemoryProbe {
    fn run(&self) -> ProbeOutcome {
        let refresh = RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram());
        let sys = System::new_with_specifics(refresh);

        let pages = match read_page_counts() {
            Ok(pages) => pages,
            Err(err) => return ProbeOutcome::failed(err),
        };

        interpret_memory(sys.total_memory(), pages, sys.used_memory())
    }

    fn describe(&self) -> &'static str {
        "memory"
    }
}

/// Page counts take precedence over the generic used figure when present.
pub fn interpret_memory(total_bytes: u64, pages: Option<PageCounts>, used_bytes: u64) -> ProbeOutcome {
    if total_bytes == 0 {
        return ProbeOutcome::failed(ProbeError::malformed("total memory reported as zero"));
    }

    let used = pages.map(|p| p.used_bytes()).unwrap_or(used_bytes);

    ProbeOutcome::ok(FieldValue::Memory(MemoryInfo {
        total_bytes,
        used_bytes: used.min(total_bytes),
    }))
}
