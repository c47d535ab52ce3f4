//! Windows graphics sources: PowerShell/CIM for adapter names and GDI
//! display enumeration for the attached monitors.
//!
//! The JSON parsing and mode conversion are platform independent so they
//! can be tested anywhere; only the OS calls are Windows specific.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::graphics::RawDisplay;
use crate::error::ProbeError;

pub const VIDEO_CONTROLLER_QUERY: &str =
    "Get-CimInstance -ClassName Win32_VideoController | Select-Object Name | ConvertTo-Json";

/// One `Win32_VideoController` row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VideoController {
    pub name: Option<String>,
}

/// Current mode of one display device attached to the desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMode {
    pub width: u32,
    pub height: u32,
    /// `dmDisplayFrequency`; 0 and 1 mean "hardware default".
    pub frequency: u32,
}

/// One display per active desktop output.
pub fn displays_from_modes(modes: &[DisplayMode]) -> Vec<RawDisplay> {
    modes
        .iter()
        .map(|mode| RawDisplay {
            width: mode.width,
            height: mode.height,
            refresh_hz: Some(mode.frequency)
                .filter(|hz| *hz > 1)
                .map(f64::from),
        })
        .collect()
}

/// `ConvertTo-Json` emits a bare object for one row and an array for many.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

/// Parse `ConvertTo-Json` output; blank output means no rows.
pub fn parse_rows<T: DeserializeOwned>(output: &str) -> Result<Vec<T>, ProbeError> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let rows = match serde_json::from_str::<OneOrMany<T>>(trimmed)? {
        OneOrMany::Many(rows) => rows,
        OneOrMany::One(row) => vec![row],
    };
    Ok(rows)
}

#[cfg(windows)]
pub fn run_powershell_json<T: DeserializeOwned>(command: &str) -> Result<Vec<T>, ProbeError> {
    let output = super::process::output(
        "powershell",
        &["-NoProfile", "-NonInteractive", "-Command", command],
    )?;

    if !output.status.success() {
        return Err(ProbeError::query(format!(
            "PowerShell exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    parse_rows(&String::from_utf8_lossy(&output.stdout))
}

#[cfg(windows)]
pub fn video_controllers() -> Result<Vec<VideoController>, ProbeError> {
    run_powershell_json(VIDEO_CONTROLLER_QUERY)
}

/// Current modes of every display device attached to the desktop,
/// skipping mirroring pseudo-devices.
#[cfg(windows)]
pub fn active_display_modes() -> Result<Vec<DisplayMode>, ProbeError> {
    use std::mem;
    use std::ptr;
    use windows_sys::Win32::Graphics::Gdi::{
        EnumDisplayDevicesW, EnumDisplaySettingsW, DEVMODEW, DISPLAY_DEVICEW,
        DISPLAY_DEVICE_ACTIVE, DISPLAY_DEVICE_MIRRORING_DRIVER, ENUM_CURRENT_SETTINGS,
    };

    let mut modes = Vec::new();
    let mut index = 0;

    loop {
        let mut device: DISPLAY_DEVICEW = unsafe { mem::zeroed() };
        device.cb = mem::size_of::<DISPLAY_DEVICEW>() as u32;

        if unsafe { EnumDisplayDevicesW(ptr::null(), index, &mut device, 0) } == 0 {
            break;
        }
        index += 1;

        if device.StateFlags & DISPLAY_DEVICE_ACTIVE == 0
            || device.StateFlags & DISPLAY_DEVICE_MIRRORING_DRIVER != 0
        {
            continue;
        }

        let mut mode: DEVMODEW = unsafe { mem::zeroed() };
        mode.dmSize = mem::size_of::<DEVMODEW>() as u16;

        let found = unsafe {
            EnumDisplaySettingsW(device.DeviceName.as_ptr(), ENUM_CURRENT_SETTINGS, &mut mode)
        };
        if found == 0 {
            let name = String::from_utf16_lossy(&device.DeviceName);
            return Err(ProbeError::query(format!(
                "no current mode for active display {}",
                name.trim_end_matches('\0')
            )));
        }

        modes.push(DisplayMode {
            width: mode.dmPelsWidth,
            height: mode.dmPelsHeight,
            frequency: mode.dmDisplayFrequency,
        });
    }

    Ok(modes)
}
