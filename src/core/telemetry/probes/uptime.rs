use sysinfo::System;

use crate::core::telemetry::probe::Probe;
use crate::core::telemetry::types::{FieldValue, ProbeOutcome};

/// Seconds since boot, read fresh on every call.
pub struct UptimeProbe;

impl Probe for UptimeProbe {
    fn run(&self) -> ProbeOutcome {
        interpret_uptime(System::uptime())
    }

    fn describe(&self) -> &'static str {
        "uptime"
    }
}

/// sysinfo reports 0 when the boot clock cannot be read.
pub fn interpret_uptime(seconds: u64) -> ProbeOutcome {
    match seconds {
        0 => ProbeOutcome::unavailable("boot time not reported by the platform"),
        secs => ProbeOutcome::ok(FieldValue::seconds(secs as f64)),
    }
}
