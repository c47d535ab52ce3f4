use crate::core::telemetry::probe::Probe;
use crate::core::telemetry::types::{FieldValue, GpuInfo, ProbeOutcome};
use crate::error::ProbeError;
use crate::platform::graphics;

/// Vendor markers that classify a device as integrated.
const INTEGRATED_MARKERS: &[&str] = &["intel", "apple"];

pub struct GpuProbe;

impl Probe for GpuProbe {
    fn run(&self) -> ProbeOutcome {
        interpret_gpus(graphics::gpu_models())
    }

    fn describe(&self) -> &'static str {
        "gpu enumeration"
    }
}

/// Heuristic integrated/discrete split based on the model string.
///
/// Not authoritative: a discrete card whose model string carries one of
/// the markers (Intel Arc, for instance) is reported as integrated.
pub fn classify_integrated(model: &str) -> bool {
    let model = model.to_ascii_lowercase();
    INTEGRATED_MARKERS.iter().any(|marker| model.contains(marker))
}

pub fn interpret_gpus(models: Result<Option<Vec<String>>, ProbeError>) -> ProbeOutcome {
    match models {
        Ok(Some(models)) => ProbeOutcome::ok(FieldValue::Gpus(
            models
                .into_iter()
                .map(|name| GpuInfo {
                    integrated: classify_integrated(&name),
                    name,
                })
                .collect(),
        )),
        Ok(None) => ProbeOutcome::unavailable("no graphics device registry on this platform"),
        Err(err) => ProbeOutcome::failed(err),
    }
}
