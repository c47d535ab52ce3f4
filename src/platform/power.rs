//! Battery state through the `battery` crate.

use crate::error::ProbeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeState {
    Charging,
    Discharging,
    Full,
    Empty,
    Unknown,
}

/// Raw power-source entry: energies in any consistent unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryReading {
    pub energy: f64,
    pub energy_full: f64,
    pub state: ChargeState,
}

impl From<battery::State> for ChargeState {
    fn from(state: battery::State) -> Self {
        match state {
            battery::State::Charging => ChargeState::Charging,
            battery::State::Discharging => ChargeState::Discharging,
            battery::State::Full => ChargeState::Full,
            battery::State::Empty => ChargeState::Empty,
            _ => ChargeState::Unknown,
        }
    }
}

/// First power source of the host, `None` when it has no battery.
///
/// The manager handle lives only for the duration of this call.
pub fn read_battery() -> Result<Option<BatteryReading>, ProbeError> {
    #[cfg(target_os = "linux")]
    {
        // Containers and many desktops have no power_supply class at all
        if !std::path::Path::new("/sys/class/power_supply").exists() {
            return Ok(None);
        }
    }

    let manager = battery::Manager::new()
        .map_err(|e| ProbeError::query(format!("Failed to open power source manager: {}", e)))?;
    let mut batteries = manager
        .batteries()
        .map_err(|e| ProbeError::query(format!("Failed to enumerate power sources: {}", e)))?;

    match batteries.next() {
        None => Ok(None),
        Some(Err(e)) => Err(ProbeError::query(format!(
            "Failed to read power source: {}",
            e
        ))),
        Some(Ok(battery)) => Ok(Some(BatteryReading {
            energy: battery.energy().value as f64,
            energy_full: battery.energy_full().value as f64,
            state: battery.state().into(),
        })),
    }
}
