use crate::core::telemetry::probe::Probe;
use crate::core::telemetry::types::{FieldValue, PowerInfo, ProbeOutcome, Reading};
use crate::core::telemetry::units;
use crate::platform::power::{read_battery, BatteryReading, ChargeState};

pub struct PowerProbe;

impl Probe for PowerProbe {
    fn run(&self) -> ProbeOutcome {
        match read_battery() {
            Ok(reading) => interpret_power(reading),
            Err(err) => ProbeOutcome::failed(err),
        }
    }

    fn describe(&self) -> &'static str {
        "power source"
    }
}

/// A host without a power source entry (desktop, AC only) is an expected
/// configuration and always yields `Unavailable`.
pub fn interpret_power(reading: Option<BatteryReading>) -> ProbeOutcome {
    let Some(reading) = reading else {
        return ProbeOutcome::unavailable("no power source");
    };

    let battery_fraction = match units::fraction(reading.energy, reading.energy_full) {
        Some(fraction) => Reading::value(fraction),
        None => Reading::unavailable("battery full-charge capacity not reported"),
    };

    let is_charging = match reading.state {
        ChargeState::Charging => Reading::value(true),
        ChargeState::Discharging | ChargeState::Empty | ChargeState::Full => Reading::value(false),
        ChargeState::Unknown => Reading::unavailable("charge state not reported"),
    };

    ProbeOutcome::ok(FieldValue::Power(PowerInfo {
        battery_fraction,
        is_charging,
    }))
}
