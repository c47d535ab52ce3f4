use crate::core::telemetry::probe::Probe;
use crate::core::telemetry::types::{FieldValue, ProbeOutcome};

/// Compile-time architecture names mapped to report labels.
const ARCHITECTURES: &[(&str, &str)] = &[("x86_64", "x86_64"), ("aarch64", "arm64")];

/// Report label for a target architecture, `"unknown"` if unsupported.
pub fn architecture_label(target_arch: &str) -> &'static str {
    ARCHITECTURES
        .iter()
        .find(|(arch, _)| *arch == target_arch)
        .map(|(_, label)| *label)
        .unwrap_or("unknown")
}

pub struct ArchitectureProbe;

impl Probe for ArchitectureProbe {
    fn run(&self) -> ProbeOutcome {
        ProbeOutcome::ok(FieldValue::text(architecture_label(std::env::consts::ARCH)))
    }

    fn describe(&self) -> &'static str {
        "architecture"
    }
}
