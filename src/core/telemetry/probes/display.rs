use crate::core::telemetry::probe::Probe;
use crate::core::telemetry::types::{DisplayInfo, FieldValue, ProbeOutcome, Reading};
use crate::error::ProbeError;
use crate::platform::graphics::{self, RawDisplay};

pub struct DisplayProbe;

impl Probe for DisplayProbe {
    fn run(&self) -> ProbeOutcome {
        interpret_displays(graphics::displays())
    }

    fn describe(&self) -> &'static str {
        "display enumeration"
    }
}

/// One record per attached display. A display without a refresh rate keeps
/// its record, with the refresh reading marked unavailable.
pub fn interpret_displays(displays: Result<Option<Vec<RawDisplay>>, ProbeError>) -> ProbeOutcome {
    let displays = match displays {
        Ok(Some(displays)) => displays,
        Ok(None) => return ProbeOutcome::unavailable("no display subsystem on this platform"),
        Err(err) => return ProbeOutcome::failed(err),
    };

    let records = displays
        .into_iter()
        .map(|display| DisplayInfo {
            width: f64::from(display.width),
            height: f64::from(display.height),
            refresh_hz: match display.refresh_hz {
                Some(hz) if hz > 0.0 => Reading::value(hz),
                _ => Reading::unavailable("refresh rate not reported for this display"),
            },
        })
        .collect();

    ProbeOutcome::ok(FieldValue::Displays(records))
}
